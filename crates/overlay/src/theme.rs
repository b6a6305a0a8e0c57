//! Tooltip theming from the hovered token's ancestor colors.

use contrast::{ColorSample, Theme, parse_color, resolve_theme};
use html::{Id, Node};

/// Collects inline background/text colors along the path from `node_id` up
/// to the document root, innermost first. Highlighted blocks carry their
/// palette as inline styles, which is all this lightweight DOM can see.
pub fn sample_color_chain(document: &Node, node_id: Id) -> Vec<ColorSample> {
    let mut path = Vec::new();
    find_path(document, node_id, &mut path);
    path.iter()
        .rev()
        .map(|node| ColorSample {
            background: node
                .inline_style("background-color")
                .or_else(|| node.inline_style("background"))
                .and_then(parse_color),
            foreground: node.inline_style("color").and_then(parse_color),
        })
        .collect()
}

/// Resolves a readable tooltip theme for the block around `node_id`.
pub fn theme_for_node(document: &Node, node_id: Id) -> Theme {
    resolve_theme(&sample_color_chain(document, node_id))
}

fn find_path<'a>(node: &'a Node, target: Id, path: &mut Vec<&'a Node>) -> bool {
    path.push(node);
    if node.id() == target {
        return true;
    }
    if let Some(children) = node.children() {
        for c in children {
            if find_path(c, target, path) {
                return true;
            }
        }
    }
    path.pop();
    false
}
