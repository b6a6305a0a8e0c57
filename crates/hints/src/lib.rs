//! Hover-hint data model and tooltip HTML rendering.

mod model;
mod render;

pub use model::{
    Documentation, FunctionDoc, HINT_LIST_KEY, HoverHint, ObjectDoc, ParamDoc, PropertyDoc,
    VariableDoc,
};
pub use render::{escape_html, render_documentation};
