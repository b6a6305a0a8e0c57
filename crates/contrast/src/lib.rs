//! Contrast-based tooltip theming.
//!
//! Given the colors found on a code block and its ancestors, pick a
//! background/foreground pair that is readable together. Readability is the
//! WCAG contrast ratio computed from sRGB relative luminance; the acceptance
//! threshold is 4.5:1.

mod parse;
mod resolve;

pub use parse::{parse_color, to_css};
pub use resolve::{ColorSample, Theme, resolve_theme};

/// RGBA color, 8 bits per channel.
pub type Color = (u8, u8, u8, u8);

pub const CONTRAST_THRESHOLD: f64 = 4.5;

/// Fallback foregrounds synthesized when no ancestor text color works.
pub const DARK_TEXT: Color = (26, 26, 26, 255);
pub const LIGHT_TEXT: Color = (240, 240, 240, 255);

/// Default pair used when no background can be determined at all.
pub const DEFAULT_BACKGROUND: Color = (250, 250, 250, 255);
pub const DEFAULT_FOREGROUND: Color = (26, 26, 26, 255);

pub fn is_transparent(color: Color) -> bool {
    color.3 == 0
}

fn channel(value: u8) -> f64 {
    let c = value as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB relative luminance in `[0, 1]`.
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b, _) = color;
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// WCAG contrast ratio between two colors, `>= 1.0`.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn is_readable(a: Color, b: Color) -> bool {
    contrast_ratio(a, b) >= CONTRAST_THRESHOLD
}

/// Picks a readable companion text color for `background`.
pub fn companion_for(background: Color) -> Color {
    if relative_luminance(background) > 0.5 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}
