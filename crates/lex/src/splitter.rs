//! Splits the text runs of a highlighted code block into addressable tokens.
//!
//! Text is cut at a fixed delimiter set; non-delimiter runs get wrapped in
//! marker `<span>` elements, delimiter runs stay plain text between them.
//! Every resulting leaf with visible text then receives a deterministic
//! base-36 token id in document order.

use core_types::{TOKEN_ID_ATTR, TokenId, WRAPPED_ATTR, encode_base36};
use html::{Id, Node};

/// Delimiter characters besides Unicode whitespace.
const DELIMITER_CHARS: &str = ".,;:()[]{}><=+*/%&|^~\"'`";

pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || DELIMITER_CHARS.contains(c)
}

#[derive(Debug, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub delimiter: bool,
}

/// Cuts a text run into alternating delimiter / non-delimiter fragments.
/// Concatenating the fragments reproduces the input exactly.
pub fn split_runs(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut in_delimiters = None::<bool>;

    for c in text.chars() {
        let delimiter = is_delimiter(c);
        if in_delimiters != Some(delimiter) {
            if let Some(was) = in_delimiters {
                fragments.push(Fragment {
                    text: std::mem::take(&mut current),
                    delimiter: was,
                });
            }
            in_delimiters = Some(delimiter);
        }
        current.push(c);
    }
    if let Some(was) = in_delimiters {
        fragments.push(Fragment {
            text: current,
            delimiter: was,
        });
    }
    fragments
}

fn is_wrapper(node: &Node) -> bool {
    node.has_attr(WRAPPED_ATTR)
}

fn make_wrapper(text: String) -> Node {
    Node::Element {
        id: Id(0),
        name: "span".to_string(),
        attributes: vec![(WRAPPED_ATTR.to_string(), Some("1".to_string()))],
        children: vec![Node::Text {
            id: Id(0),
            text,
        }],
    }
}

/// True when a text child must be cut up and wrapped. A lone text child made
/// entirely of token characters stays put: its parent element is already an
/// addressable leaf (the common shape highlighters emit).
fn needs_wrap(text: &str, only_child: bool) -> bool {
    if !text.chars().any(|c| !is_delimiter(c)) {
        return false;
    }
    !(only_child && text.chars().all(|c| !is_delimiter(c)))
}

/// Wraps every non-delimiter run under `node` in a marker span.
///
/// Idempotent: subtrees already marked as inserted wrappers are skipped, so a
/// second pass over a tokenized block leaves it unchanged. Text runs without
/// any non-delimiter character (blank or pure punctuation) stay plain text.
pub fn wrap_code_tokens(node: &mut Node) {
    if is_wrapper(node) {
        return;
    }
    let Some(children) = node.children_mut() else {
        return;
    };
    let only_child = children.len() == 1;
    let needs_rebuild = children
        .iter()
        .any(|c| matches!(c, Node::Text { text, .. } if needs_wrap(text, only_child)));

    if needs_rebuild {
        let old: Vec<Node> = children.drain(..).collect();
        for mut child in old {
            match child {
                Node::Text { text, .. } if needs_wrap(&text, only_child) => {
                    for fragment in split_runs(&text) {
                        if fragment.delimiter {
                            children.push(Node::Text {
                                id: Id(0),
                                text: fragment.text,
                            });
                        } else {
                            children.push(make_wrapper(fragment.text));
                        }
                    }
                }
                _ => {
                    wrap_code_tokens(&mut child);
                    children.push(child);
                }
            }
        }
    } else {
        for child in children {
            wrap_code_tokens(child);
        }
    }
}

/// Assigns token ids to every untagged text-bearing leaf element under
/// `node`, in document order, starting at `counter`. Returns the next free
/// counter value so callers can thread it across code blocks.
pub fn assign_token_ids(node: &mut Node, mut counter: u64) -> u64 {
    fn walk(node: &mut Node, counter: &mut u64) {
        if matches!(node, Node::Element { .. }) && !node.has_element_children() {
            if !node.text_content().trim().is_empty() && !node.has_attr(TOKEN_ID_ATTR) {
                node.set_attr(TOKEN_ID_ATTR, &encode_base36(*counter));
                *counter += 1;
            }
            return;
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, counter);
            }
        }
    }
    walk(node, &mut counter);
    counter
}

/// Tokenizes one code block in place: wrap, then tag leaves. Returns the next
/// free token counter.
pub fn tokenize_code_block(root: &mut Node, counter: u64) -> u64 {
    wrap_code_tokens(root);
    let next = assign_token_ids(root, counter);
    html::assign_node_ids(root);
    next
}

/// Lists `(token id, node id)` pairs for every tagged leaf, in document order.
pub fn token_elements(node: &Node, out: &mut Vec<(TokenId, Id)>) {
    if let Some(token_id) = node.attr(TOKEN_ID_ATTR) {
        out.push((token_id.to_string(), node.id()));
        return;
    }
    if let Some(children) = node.children() {
        for c in children {
            token_elements(c, out);
        }
    }
}
