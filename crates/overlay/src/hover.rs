//! Hint attachment and the shared tooltip's hover state machine.
//!
//! The state machine is a plain value plus transition methods; the host
//! event loop owns the actual timer and tooltip element and acts on what the
//! transitions return. Phases: no tooltip, tooltip visible with a hide timer
//! armed, tooltip visible with the pointer over a hinted token.

use std::collections::HashMap;
use std::time::Duration;

use contrast::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, Theme};
use core_types::{BlockId, TokenId};
use hints::{HoverHint, render_documentation};
use html::Node;

use crate::registry::IdMappings;

/// Delay between the pointer leaving a hinted token and the tooltip hiding.
pub const HIDE_DELAY: Duration = Duration::from_millis(300);

/// Dotted underline written onto hinted token elements.
const AFFORDANCE_STYLE: &str = "border-bottom: 1px dotted currentColor; cursor: help";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverPhase {
    #[default]
    Idle,
    PendingHide,
    Shown,
}

/// What the host must do after a pointer-enter transition.
#[derive(Debug, PartialEq)]
pub struct ShowTooltip {
    /// Rendered hint body to place into the tooltip element.
    pub content: String,
    /// A hide timer is armed and must be cancelled.
    pub cancel_pending_hide: bool,
    /// The hovered block is not the themed one; sample its colors and call
    /// [`HoverHintState::set_theme`] before display.
    pub needs_retheme: bool,
}

/// Per-page hover state: accumulated rendered hints plus the shared
/// tooltip's phase and cached theme. The rendered map only grows within a
/// page's lifetime.
#[derive(Debug)]
pub struct HoverHintState {
    rendered: HashMap<TokenId, String>,
    phase: HoverPhase,
    themed_block: Option<BlockId>,
    theme: Theme,
}

impl Default for HoverHintState {
    fn default() -> Self {
        HoverHintState {
            rendered: HashMap::new(),
            phase: HoverPhase::Idle,
            themed_block: None,
            theme: Theme {
                background: DEFAULT_BACKGROUND,
                foreground: DEFAULT_FOREGROUND,
            },
        }
    }
}

impl HoverHintState {
    pub fn new() -> Self {
        HoverHintState::default()
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn rendered_for(&self, token_id: &str) -> Option<&str> {
        self.rendered.get(token_id).map(String::as_str)
    }

    pub fn insert_rendered(&mut self, token_id: TokenId, html: String) {
        self.rendered.insert(token_id, html);
    }

    /// Pointer entered a token. Returns `None` for tokens without a hint
    /// (the phase is left as is, so a still-armed hide timer keeps running).
    pub fn on_token_enter(&mut self, token_id: &str, block_id: &BlockId) -> Option<ShowTooltip> {
        let content = self.rendered.get(token_id)?.clone();
        let cancel_pending_hide = self.phase == HoverPhase::PendingHide;
        let needs_retheme = self.themed_block.as_ref() != Some(block_id);
        self.phase = HoverPhase::Shown;
        Some(ShowTooltip {
            content,
            cancel_pending_hide,
            needs_retheme,
        })
    }

    /// Pointer left a hinted token. Returns true when the host must arm a
    /// hide timer for [`HIDE_DELAY`].
    pub fn on_token_leave(&mut self) -> bool {
        if self.phase == HoverPhase::Shown {
            self.phase = HoverPhase::PendingHide;
            true
        } else {
            false
        }
    }

    /// The hide timer fired. Returns true when the tooltip must actually
    /// hide; a stale timer (the pointer re-entered meanwhile) is ignored.
    pub fn on_hide_timer(&mut self) -> bool {
        if self.phase == HoverPhase::PendingHide {
            self.phase = HoverPhase::Idle;
            true
        } else {
            false
        }
    }

    /// Caches the theme resolved for `block_id`; subsequent hovers inside
    /// the same block skip re-theming.
    pub fn set_theme(&mut self, block_id: BlockId, theme: Theme) {
        self.themed_block = Some(block_id);
        self.theme = theme;
    }
}

/// Attaches one streamed hint: stores its rendered HTML under every token id
/// it covers and writes the underline affordance onto the live elements.
/// Ids with no resolvable element are logged and skipped.
pub fn attach_hover_hint(
    hint: &HoverHint,
    state: &mut HoverHintState,
    mappings: &IdMappings,
    document: &mut Node,
) {
    let rendered = render_documentation(&hint.documentation);
    for token_id in &hint.ids {
        let Some(node_id) = mappings.node_of(token_id) else {
            log::warn!("hint references unknown token id {token_id}, skipping");
            continue;
        };
        let Some(element) = html::find_node_by_id_mut(document, node_id) else {
            log::warn!("token {token_id} no longer resolves to a live element, skipping");
            continue;
        };
        apply_affordance(element);
        state.insert_rendered(token_id.clone(), rendered.clone());
    }
}

fn apply_affordance(element: &mut Node) {
    // Already marked; a second hint for the same token must not stack
    // another underline declaration.
    if element.inline_style("cursor") == Some("help") {
        return;
    }
    let style = match element.attr("style") {
        Some(existing) if !existing.trim().is_empty() => {
            format!("{}; {AFFORDANCE_STYLE}", existing.trim_end().trim_end_matches(';'))
        }
        _ => AFFORDANCE_STYLE.to_string(),
    };
    element.set_attr("style", &style);
}

#[cfg(test)]
mod tests {
    use super::{HoverHintState, HoverPhase, attach_hover_hint};
    use contrast::Theme;
    use hints::{Documentation, HoverHint, VariableDoc};
    use html::parse;

    use crate::registry::PageState;

    fn variable_hint(ids: &[&str], body: &str) -> HoverHint {
        HoverHint {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            documentation: Documentation::Variable(VariableDoc {
                doc_in_html: body.to_string(),
            }),
        }
    }

    fn state_with_hint(token_id: &str) -> HoverHintState {
        let mut state = HoverHintState::new();
        state.insert_rendered(token_id.to_string(), "<div>doc</div>".to_string());
        state
    }

    #[test]
    fn enter_leave_timer_cycle_returns_to_idle() {
        let mut state = state_with_hint("0");
        let block = "cb-0".to_string();

        let show = state.on_token_enter("0", &block).unwrap();
        assert!(!show.cancel_pending_hide);
        assert!(show.needs_retheme, "first hover must theme the tooltip");
        assert_eq!(state.phase(), HoverPhase::Shown);

        assert!(state.on_token_leave(), "leaving arms the hide timer");
        assert_eq!(state.phase(), HoverPhase::PendingHide);

        assert!(state.on_hide_timer());
        assert_eq!(state.phase(), HoverPhase::Idle);
    }

    #[test]
    fn reenter_cancels_pending_hide_without_retheme() {
        let mut state = state_with_hint("0");
        let block = "cb-0".to_string();
        state.set_theme(block.clone(), Theme {
            background: (255, 255, 255, 255),
            foreground: (0, 0, 0, 255),
        });

        state.on_token_enter("0", &block).unwrap();
        state.on_token_leave();

        let show = state.on_token_enter("0", &block).unwrap();
        assert!(show.cancel_pending_hide);
        assert!(!show.needs_retheme, "same block keeps the cached theme");
        assert_eq!(state.phase(), HoverPhase::Shown);

        assert!(!state.on_hide_timer(), "stale timer must be ignored");
        assert_eq!(state.phase(), HoverPhase::Shown);
    }

    #[test]
    fn crossing_into_another_block_rethemes() {
        let mut state = state_with_hint("0");
        state.insert_rendered("5".to_string(), "<div>other</div>".to_string());
        let first = "cb-0".to_string();
        let second = "cb-1".to_string();

        state.on_token_enter("0", &first).unwrap();
        state.set_theme(first.clone(), Theme {
            background: (40, 44, 52, 255),
            foreground: (240, 240, 240, 255),
        });

        let show = state.on_token_enter("5", &second).unwrap();
        assert!(show.needs_retheme);
    }

    #[test]
    fn unhinted_token_does_not_change_phase() {
        let mut state = state_with_hint("0");
        let block = "cb-0".to_string();
        state.on_token_enter("0", &block).unwrap();
        state.on_token_leave();

        assert!(state.on_token_enter("99", &block).is_none());
        assert_eq!(state.phase(), HoverPhase::PendingHide);
    }

    #[test]
    fn attach_stores_html_and_marks_elements() {
        let mut dom = parse("<pre>alpha beta</pre>");
        let mut page = PageState::new();
        page.process_document(&mut dom);
        let mut state = HoverHintState::new();

        attach_hover_hint(
            &variable_hint(&["0", "1"], "docs"),
            &mut state,
            &page.mappings,
            &mut dom,
        );

        assert!(state.rendered_for("0").is_some());
        assert!(state.rendered_for("1").is_some());
        let node = html::find_node_by_id(&dom, page.mappings.node_of("0").unwrap()).unwrap();
        assert_eq!(node.inline_style("cursor"), Some("help"));
        assert!(node.inline_style("border-bottom").is_some());
    }

    #[test]
    fn broken_token_id_is_skipped_not_fatal() {
        let mut dom = parse("<pre>alpha</pre>");
        let mut page = PageState::new();
        page.process_document(&mut dom);
        let mut state = HoverHintState::new();

        attach_hover_hint(
            &variable_hint(&["missing", "0"], "docs"),
            &mut state,
            &page.mappings,
            &mut dom,
        );

        assert!(state.rendered_for("missing").is_none());
        assert!(state.rendered_for("0").is_some(), "valid ids still attach");
    }

    #[test]
    fn affordance_is_applied_once_and_keeps_existing_style() {
        let mut dom = parse(r#"<pre><span style="color: #fff">x</span></pre>"#);
        let mut page = PageState::new();
        page.process_document(&mut dom);
        let mut state = HoverHintState::new();

        attach_hover_hint(&variable_hint(&["0"], "a"), &mut state, &page.mappings, &mut dom);
        attach_hover_hint(&variable_hint(&["0"], "b"), &mut state, &page.mappings, &mut dom);

        let node = html::find_node_by_id(&dom, page.mappings.node_of("0").unwrap()).unwrap();
        let style = node.attr("style").unwrap();
        assert_eq!(style.matches("dotted").count(), 1, "got: {style}");
        assert!(style.starts_with("color: #fff"), "got: {style}");
    }
}
