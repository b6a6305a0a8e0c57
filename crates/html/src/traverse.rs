use crate::types::{Id, Node};

/// Assigns ids to every node that still has the unset id `Id(0)`, in document
/// order. Already-assigned ids are kept, so re-running after a partial rebuild
/// never renumbers live nodes.
pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        if node.id() == Id(0) {
            let id = Id(*next);
            *next = next.wrapping_add(1);
            node.set_id(id);
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = highest_node_id(root).wrapping_add(1).max(1);
    walk(root, &mut next);
}

fn highest_node_id(node: &Node) -> u32 {
    let mut max = node.id().0;
    if let Some(children) = node.children() {
        for c in children {
            max = max.max(highest_node_id(c));
        }
    }
    max
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    for c in node.children()? {
        if let Some(found) = find_node_by_id(c, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    for c in node.children_mut()? {
        if let Some(found) = find_node_by_id_mut(c, id) {
            return Some(found);
        }
    }
    None
}

/// Collects ids of leaf elements (no element children) whose text content is
/// not blank, in document order.
pub fn collect_text_leaves(node: &Node, out: &mut Vec<Id>) {
    if let Node::Element { .. } = node {
        if !node.has_element_children() {
            if !node.text_content().trim().is_empty() {
                out.push(node.id());
            }
            return;
        }
    }
    if let Some(children) = node.children() {
        for c in children {
            collect_text_leaves(c, out);
        }
    }
}
