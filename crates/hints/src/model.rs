//! Wire model for hover hints, matching the JSON schema requested from the
//! model: `{ "hoverHintList": [ { "ids": […], "documentation": {…} }, … ] }`.
//! The documentation variant is tag-discriminated on `type`.

use std::collections::BTreeMap;

use core_types::TokenId;
use serde::{Deserialize, Serialize};

/// JSON key of the streamed hint array.
pub const HINT_LIST_KEY: &str = "hoverHintList";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HoverHint {
    /// Token ids this hint attaches to, in order.
    pub ids: Vec<TokenId>,
    pub documentation: Documentation,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Documentation {
    Function(FunctionDoc),
    Object(ObjectDoc),
    Variable(VariableDoc),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDoc {
    pub signature: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub param_docs: Vec<ParamDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Literal signature substrings mapped to CSS declarations, used to
    /// recolor the rendered signature to match the source theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_styles: Option<BTreeMap<String, String>>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParamDoc {
    pub name: String,
    pub doc: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDoc {
    pub doc_in_html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_docs: Option<Vec<PropertyDoc>>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDoc {
    pub name: String,
    pub doc: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableDoc {
    pub doc_in_html: String,
}

#[cfg(test)]
mod tests {
    use super::{Documentation, HoverHint};

    #[test]
    fn variable_hint_deserializes_from_wire_shape() {
        let raw = r#"{"ids":["a"],"documentation":{"type":"variable","docInHtml":"x"}}"#;
        let hint: HoverHint = serde_json::from_str(raw).unwrap();
        assert_eq!(hint.ids, vec!["a"]);
        assert!(
            matches!(&hint.documentation, Documentation::Variable(v) if v.doc_in_html == "x")
        );
    }

    #[test]
    fn function_hint_accepts_optional_fields_missing() {
        let raw = r#"{"ids":["f"],"documentation":{"type":"function","signature":"fn f()"}}"#;
        let hint: HoverHint = serde_json::from_str(raw).unwrap();
        let Documentation::Function(doc) = &hint.documentation else {
            panic!("expected function variant");
        };
        assert_eq!(doc.signature, "fn f()");
        assert!(doc.param_docs.is_empty());
        assert!(doc.return_doc.is_none());
    }

    #[test]
    fn object_hint_reads_property_docs() {
        let raw = r#"{"ids":["o"],"documentation":{"type":"object",
            "docInHtml":"A config object",
            "propertyDocs":[{"name":"url","doc":"endpoint"}]}}"#;
        let hint: HoverHint = serde_json::from_str(raw).unwrap();
        let Documentation::Object(doc) = &hint.documentation else {
            panic!("expected object variant");
        };
        assert_eq!(doc.property_docs.as_ref().unwrap()[0].name, "url");
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let raw = r#"{"ids":["a"],"documentation":{"type":"class","docInHtml":"x"}}"#;
        assert!(serde_json::from_str::<HoverHint>(raw).is_err());
    }
}
