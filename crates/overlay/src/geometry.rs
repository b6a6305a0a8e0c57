//! Tooltip placement relative to an anchor rectangle.

/// Gap kept between the tooltip, its anchor, and the viewport edges.
pub const VIEWPORT_PADDING: f32 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Places a tooltip of `width` x `height` near `anchor` within a viewport of
/// `viewport` (width, height). Preferred position is below the anchor,
/// left-aligned; a placement overflowing the bottom edge flips above the
/// anchor, one overflowing the right edge shifts left. The result is clamped
/// so the tooltip never starts outside the padded viewport.
pub fn place_tooltip(anchor: Rect, width: f32, height: f32, viewport: (f32, f32)) -> (f32, f32) {
    let (view_w, view_h) = viewport;

    let mut x = anchor.x;
    let mut y = anchor.bottom() + VIEWPORT_PADDING;

    if y + height > view_h - VIEWPORT_PADDING {
        y = anchor.y - height - VIEWPORT_PADDING;
    }
    if x + width > view_w - VIEWPORT_PADDING {
        x = view_w - VIEWPORT_PADDING - width;
    }

    (x.max(VIEWPORT_PADDING), y.max(VIEWPORT_PADDING))
}

#[cfg(test)]
mod tests {
    use super::{Rect, VIEWPORT_PADDING, place_tooltip};

    const VIEWPORT: (f32, f32) = (1000.0, 600.0);

    #[test]
    fn default_placement_is_below_and_left_aligned() {
        let anchor = Rect::new(100.0, 100.0, 60.0, 20.0);
        let (x, y) = place_tooltip(anchor, 200.0, 80.0, VIEWPORT);
        assert_eq!(x, 100.0);
        assert_eq!(y, anchor.bottom() + VIEWPORT_PADDING);
    }

    #[test]
    fn bottom_overflow_flips_above_the_anchor() {
        let anchor = Rect::new(100.0, 560.0, 60.0, 20.0);
        let (_, y) = place_tooltip(anchor, 200.0, 80.0, VIEWPORT);
        assert_eq!(y, anchor.y - 80.0 - VIEWPORT_PADDING);
    }

    #[test]
    fn right_overflow_shifts_left_inside_the_viewport() {
        let anchor = Rect::new(950.0, 100.0, 40.0, 20.0);
        let (x, _) = place_tooltip(anchor, 200.0, 80.0, VIEWPORT);
        assert_eq!(x, VIEWPORT.0 - VIEWPORT_PADDING - 200.0);
    }

    #[test]
    fn result_never_starts_outside_the_padded_viewport() {
        // Anchor at the very top-left with a tooltip taller than the space
        // above it: both axes clamp to the padding.
        let anchor = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (x, y) = place_tooltip(anchor, 2000.0, 1000.0, VIEWPORT);
        assert_eq!(x, VIEWPORT_PADDING);
        assert_eq!(y, VIEWPORT_PADDING);
    }
}
