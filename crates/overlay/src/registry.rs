//! Per-page registry: code block discovery, token id mappings.

use std::collections::HashMap;

use core_types::{BLOCK_ID_ATTR, BlockId, TokenId, encode_base36};
use html::{Id, Node};

/// Finds code block roots in document order: `<pre>` elements, and `<code>`
/// elements not nested inside one.
pub fn find_code_block_roots(document: &Node) -> Vec<Id> {
    fn walk(node: &Node, inside_block: bool, out: &mut Vec<Id>) {
        let is_root =
            !inside_block && (node.is_element_named("pre") || node.is_element_named("code"));
        if is_root {
            out.push(node.id());
        }
        if let Some(children) = node.children() {
            for c in children {
                walk(c, inside_block || is_root, out);
            }
        }
    }
    let mut roots = Vec::new();
    walk(document, false, &mut roots);
    roots
}

/// Token lookup tables scoped to one page. Populated as blocks are
/// tokenized; never pruned.
#[derive(Debug, Default)]
pub struct IdMappings {
    token_nodes: HashMap<TokenId, Id>,
    token_blocks: HashMap<TokenId, BlockId>,
}

impl IdMappings {
    pub fn record(&mut self, token_id: TokenId, node_id: Id, block_id: &BlockId) {
        self.token_nodes.insert(token_id.clone(), node_id);
        self.token_blocks.insert(token_id, block_id.clone());
    }

    pub fn node_of(&self, token_id: &str) -> Option<Id> {
        self.token_nodes.get(token_id).copied()
    }

    pub fn block_of(&self, token_id: &str) -> Option<&BlockId> {
        self.token_blocks.get(token_id)
    }

    pub fn len(&self) -> usize {
        self.token_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_nodes.is_empty()
    }
}

/// Mutable per-page state threaded through tokenization and hint handling.
/// Created once per page; token and block counters are page-global so ids
/// stay unique across blocks.
#[derive(Debug, Default)]
pub struct PageState {
    pub mappings: IdMappings,
    next_token: u64,
    next_block: u64,
}

impl PageState {
    pub fn new() -> Self {
        PageState::default()
    }

    /// Tokenizes every code block in the document and records token
    /// mappings. Blocks that already carry a block id keep it, so repeated
    /// observation of the same page returns the same identities. Returns the
    /// block ids in document order.
    pub fn process_document(&mut self, document: &mut Node) -> Vec<BlockId> {
        let roots = find_code_block_roots(document);
        let mut block_ids = Vec::with_capacity(roots.len());

        for root_id in &roots {
            let Some(block) = html::find_node_by_id_mut(document, *root_id) else {
                continue;
            };
            let block_id = self.ensure_block_id(block);
            lex::wrap_code_tokens(block);
            self.next_token = lex::assign_token_ids(block, self.next_token);
            block_ids.push(block_id);
        }

        // Wrapper spans created above still carry the unset node id; number
        // them document-wide before taking mappings so ids never collide
        // across blocks.
        html::assign_node_ids(document);

        for (root_id, block_id) in roots.iter().zip(&block_ids) {
            let Some(block) = html::find_node_by_id(document, *root_id) else {
                continue;
            };
            let mut tokens = Vec::new();
            lex::token_elements(block, &mut tokens);
            log::debug!("block {block_id}: {} tokens", tokens.len());
            for (token_id, node_id) in tokens {
                self.mappings.record(token_id, node_id, block_id);
            }
        }
        block_ids
    }

    fn ensure_block_id(&mut self, block: &mut Node) -> BlockId {
        if let Some(existing) = block.attr(BLOCK_ID_ATTR) {
            return existing.to_string();
        }
        let block_id = format!("cb-{}", encode_base36(self.next_block));
        self.next_block += 1;
        block.set_attr(BLOCK_ID_ATTR, &block_id);
        block_id
    }
}
