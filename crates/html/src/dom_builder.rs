use crate::types::{Id, Node, Token};

/// Builds a DOM tree from a token stream. Mismatched end tags pop the open
/// stack until a matching element is found, which keeps the builder total on
/// malformed input.
pub fn build_dom(tokens: &[Token]) -> Node {
    let mut arena = NodeArena::new();
    let root_index = arena.push(ArenaNode::Document {
        doctype: None,
        children: Vec::new(),
    });
    let mut open_elements: Vec<usize> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(s) => arena.set_doctype(root_index, s.clone()),
            Token::Comment(c) => {
                let parent = open_elements.last().copied().unwrap_or(root_index);
                arena.add_child(parent, ArenaNode::Comment { text: c.clone() });
            }
            Token::Text(text) => {
                if !text.is_empty() {
                    let parent = open_elements.last().copied().unwrap_or(root_index);
                    arena.add_child(parent, ArenaNode::Text { text: text.clone() });
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let parent = open_elements.last().copied().unwrap_or(root_index);
                let new_index = arena.add_child(
                    parent,
                    ArenaNode::Element {
                        name: name.clone(),
                        attributes: attributes.clone(),
                        children: Vec::new(),
                    },
                );
                if !*self_closing {
                    open_elements.push(new_index);
                }
            }
            Token::EndTag(name) => {
                let had_match = open_elements
                    .iter()
                    .any(|&idx| arena.is_element_named(idx, name));
                if !had_match {
                    log::debug!("dropping unmatched end tag </{name}>");
                    continue;
                }
                while let Some(open_index) = open_elements.pop() {
                    if arena.is_element_named(open_index, name) {
                        break;
                    }
                }
            }
        }
    }

    arena.into_dom(root_index)
}

#[derive(Debug)]
enum ArenaNode {
    Document {
        doctype: Option<String>,
        children: Vec<usize>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn add_child(&mut self, parent: usize, child: ArenaNode) -> usize {
        let child_index = self.push(child);
        match &mut self.nodes[parent] {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                children.push(child_index);
            }
            _ => {}
        }
        child_index
    }

    fn set_doctype(&mut self, index: usize, value: String) {
        if let ArenaNode::Document { doctype, .. } = &mut self.nodes[index] {
            *doctype = Some(value);
        }
    }

    fn is_element_named(&self, index: usize, target: &str) -> bool {
        matches!(&self.nodes[index], ArenaNode::Element { name, .. } if name == target)
    }

    fn into_dom(mut self, root_index: usize) -> Node {
        fn take(nodes: &mut Vec<ArenaNode>, index: usize) -> Node {
            // Children are built by replacing arena slots; indices stay valid
            // because the vector is never shrunk while converting.
            let child_indices = match &nodes[index] {
                ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                    children.clone()
                }
                _ => Vec::new(),
            };
            let built: Vec<Node> = child_indices.into_iter().map(|c| take(nodes, c)).collect();
            match std::mem::replace(&mut nodes[index], ArenaNode::Text { text: String::new() }) {
                ArenaNode::Document { doctype, .. } => Node::Document {
                    id: Id(0),
                    doctype,
                    children: built,
                },
                ArenaNode::Element { name, attributes, .. } => Node::Element {
                    id: Id(0),
                    name,
                    attributes,
                    children: built,
                },
                ArenaNode::Text { text } => Node::Text { id: Id(0), text },
                ArenaNode::Comment { text } => Node::Comment { id: Id(0), text },
            }
        }
        take(&mut self.nodes, root_index)
    }
}
