//! Page-side overlay state: code-block registry, hint attachment, the shared
//! tooltip's hover state machine, placement, and per-block theming.

mod debounce;
mod geometry;
mod hover;
mod registry;
mod theme;

pub use debounce::{STABILITY_WINDOW, StabilityTracker};
pub use geometry::{Rect, VIEWPORT_PADDING, place_tooltip};
pub use hover::{HIDE_DELAY, HoverHintState, HoverPhase, ShowTooltip, attach_hover_hint};
pub use registry::{IdMappings, PageState, find_code_block_roots};
pub use theme::{sample_color_chain, theme_for_node};
