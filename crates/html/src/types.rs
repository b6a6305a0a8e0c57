pub type NodeId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Id(pub NodeId);

#[derive(Debug, PartialEq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Clone, Debug)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn is_element_named(&self, target: &str) -> bool {
        matches!(self, Node::Element { name, .. } if name.eq_ignore_ascii_case(target))
    }

    /// First value of the named attribute, if present with a value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    pub fn has_attr(&self, key: &str) -> bool {
        match self {
            Node::Element { attributes, .. } => {
                attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
            }
            _ => false,
        }
    }

    /// Sets or replaces an attribute value. No-op on non-elements.
    pub fn set_attr(&mut self, key: &str, value: &str) {
        if let Node::Element { attributes, .. } = self {
            if let Some(slot) = attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
                slot.1 = Some(value.to_string());
            } else {
                attributes.push((key.to_string(), Some(value.to_string())));
            }
        }
    }

    /// Value of one property inside the inline `style` attribute, if declared.
    /// Declarations without a colon (empty segments from `;;`, a leading or
    /// trailing `;`) are skipped, not treated as the end of the list.
    pub fn inline_style(&self, property: &str) -> Option<&str> {
        let style = self.attr("style")?;
        for declaration in style.split(';') {
            let Some((key, value)) = declaration.split_once(':') else {
                continue;
            };
            if key.trim().eq_ignore_ascii_case(property) {
                return Some(value.trim());
            }
        }
        None
    }

    pub fn has_element_children(&self) -> bool {
        self.children()
            .is_some_and(|children| children.iter().any(|c| matches!(c, Node::Element { .. })))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text { text, .. } => out.push_str(text),
                Node::Document { children, .. } | Node::Element { children, .. } => {
                    for c in children {
                        walk(c, out);
                    }
                }
                _ => {}
            }
        }
        let mut out = String::new();
        walk(self, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Id, Node};

    fn elem(name: &str, attributes: Vec<(&str, &str)>, children: Vec<Node>) -> Node {
        Node::Element {
            id: Id(0),
            name: name.to_string(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.to_string(), Some(v.to_string())))
                .collect(),
            children,
        }
    }

    fn text_node(text: &str) -> Node {
        Node::Text {
            id: Id(0),
            text: text.to_string(),
        }
    }

    #[test]
    fn attr_lookup_is_case_insensitive() {
        let node = elem("span", vec![("CLASS", "kw")], vec![]);
        assert_eq!(node.attr("class"), Some("kw"));
    }

    #[test]
    fn set_attr_replaces_existing_value() {
        let mut node = elem("span", vec![("class", "kw")], vec![]);
        node.set_attr("class", "ident");
        assert_eq!(node.attr("class"), Some("ident"));
    }

    #[test]
    fn inline_style_reads_single_property() {
        let node = elem(
            "pre",
            vec![("style", "background-color: #fff; color: rgb(0, 0, 0)")],
            vec![],
        );
        assert_eq!(node.inline_style("background-color"), Some("#fff"));
        assert_eq!(node.inline_style("color"), Some("rgb(0, 0, 0)"));
        assert_eq!(node.inline_style("font-size"), None);
    }

    #[test]
    fn inline_style_skips_declarations_without_a_colon() {
        let node = elem(
            "pre",
            vec![("style", "font-weight:bold;;color: #abb2bf")],
            vec![],
        );
        assert_eq!(node.inline_style("color"), Some("#abb2bf"));

        let node = elem("pre", vec![("style", ";background-color: #282c34")], vec![]);
        assert_eq!(node.inline_style("background-color"), Some("#282c34"));
        assert_eq!(node.inline_style("color"), None);
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let node = elem(
            "code",
            vec![],
            vec![
                elem("span", vec![], vec![text_node("const")]),
                text_node(" x"),
            ],
        );
        assert_eq!(node.text_content(), "const x");
    }

    #[test]
    fn has_element_children_ignores_text_nodes() {
        let leaf = elem("span", vec![], vec![text_node("const")]);
        assert!(!leaf.has_element_children());
        let parent = elem("code", vec![], vec![leaf]);
        assert!(parent.has_element_children());
    }
}
