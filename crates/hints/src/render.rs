//! Renders a hint's documentation payload to tooltip HTML.
//!
//! All free text coming from the model is escaped before insertion; the only
//! markup in the output is generated here.

use std::collections::BTreeMap;

use regex::Regex;

use crate::model::{Documentation, FunctionDoc, ObjectDoc, VariableDoc};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(input: &str) -> String {
    escape_html(input).replace('"', "&quot;")
}

/// Renders the rendered-HTML string stored per token id.
pub fn render_documentation(doc: &Documentation) -> String {
    match doc {
        Documentation::Function(doc) => render_function(doc),
        Documentation::Object(doc) => render_object(doc),
        Documentation::Variable(doc) => render_variable(doc),
    }
}

fn render_function(doc: &FunctionDoc) -> String {
    let signature = match &doc.token_styles {
        Some(styles) => recolor_signature(&doc.signature, styles),
        None => escape_html(&doc.signature),
    };
    let mut out = format!("<div class=\"hoverlay-signature\"><code>{signature}</code></div>");
    for param in &doc.param_docs {
        out.push_str(&format!(
            "<div class=\"hoverlay-param\">@Param {}: {}</div>",
            escape_html(&param.name),
            escape_html(&param.doc)
        ));
    }
    if let Some(return_doc) = &doc.return_doc {
        out.push_str(&format!(
            "<div class=\"hoverlay-return\">@Return: {}</div>",
            escape_html(return_doc)
        ));
    }
    if let Some(explanation) = &doc.explanation {
        out.push_str(&format!(
            "<div class=\"hoverlay-explanation\">{}</div>",
            escape_html(explanation)
        ));
    }
    out
}

fn render_object(doc: &ObjectDoc) -> String {
    let mut out = format!(
        "<div class=\"hoverlay-doc\">{}</div>",
        escape_html(&doc.doc_in_html)
    );
    if let Some(properties) = &doc.property_docs {
        if !properties.is_empty() {
            out.push_str("<ul class=\"hoverlay-properties\">");
            for property in properties {
                out.push_str(&format!(
                    "<li><b>{}</b>: {}</li>",
                    escape_html(&property.name),
                    escape_html(&property.doc)
                ));
            }
            out.push_str("</ul>");
        }
    }
    out
}

fn render_variable(doc: &VariableDoc) -> String {
    format!(
        "<div class=\"hoverlay-doc\">{}</div>",
        escape_html(&doc.doc_in_html)
    )
}

/// Recolors literal signature substrings with the styling map, matching each
/// key as a whole word against the escaped signature. Keys that do not form a
/// usable pattern are skipped.
fn recolor_signature(signature: &str, styles: &BTreeMap<String, String>) -> String {
    let mut out = escape_html(signature);
    for (token, css) in styles {
        let escaped_token = escape_html(token);
        let pattern = format!(r"\b{}\b", regex::escape(&escaped_token));
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(err) => {
                log::warn!("skipping unstylable signature token {token:?}: {err}");
                continue;
            }
        };
        let style = escape_attr(css);
        out = re
            .replace_all(&out, |caps: &regex::Captures| {
                format!("<span style=\"{}\">{}</span>", style, &caps[0])
            })
            .into_owned();
    }
    out
}
