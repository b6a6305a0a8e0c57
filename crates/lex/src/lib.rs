//! Code-block tokenization and model-input canonicalization.

mod canonical;
mod splitter;

pub use canonical::canonicalize;
pub use splitter::{
    Fragment, assign_token_ids, is_delimiter, split_runs, token_elements, tokenize_code_block,
    wrap_code_tokens,
};
