//! Lightweight HTML support for the annotation pipeline: a constrained
//! tokenizer, a forgiving DOM builder, a serializer and traversal helpers.
//!
//! Code blocks arrive as already-highlighted markup; this crate turns that
//! markup into a mutable tree the token splitter can rewrite, and back into a
//! string for canonicalization.

mod dom_builder;
mod entities;
mod markup;
mod serialize;
mod traverse;
mod types;

pub use dom_builder::build_dom;
pub use entities::decode_entities;
pub use markup::tokenize;
pub use serialize::{escape_text, serialize};
pub use traverse::{
    assign_node_ids, collect_text_leaves, find_node_by_id, find_node_by_id_mut,
};
pub use types::{Id, Node, NodeId, Token};

/// Parses markup into a DOM tree with node ids assigned.
pub fn parse(input: &str) -> Node {
    let mut dom = build_dom(&tokenize(input));
    assign_node_ids(&mut dom);
    dom
}
