use crate::Color;

/// Parses a CSS color value: `#rgb`, `#rrggbb`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)`, `transparent`, or a named color from the basic set.
pub fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim().to_ascii_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some((r, g, b, 255));
        } else if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some((r, g, b, 255));
        }
        return None;
    }

    if let Some(body) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let r = parts[0].parse::<u8>().ok()?;
        let g = parts[1].parse::<u8>().ok()?;
        let b = parts[2].parse::<u8>().ok()?;
        let a = if parts.len() == 4 {
            let alpha = parts[3].parse::<f32>().ok()?;
            if !(0.0..=1.0).contains(&alpha) {
                return None;
            }
            (alpha * 255.0).round() as u8
        } else {
            255
        };
        return Some((r, g, b, a));
    }

    let named = match s.as_str() {
        "transparent" => (0, 0, 0, 0),
        "black" => (0, 0, 0, 255),
        "blue" => (0, 0, 255, 255),
        "cyan" => (0, 255, 255, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        "green" => (0, 128, 0, 255),
        "magenta" => (255, 0, 255, 255),
        "maroon" => (128, 0, 0, 255),
        "navy" => (0, 0, 128, 255),
        "olive" => (128, 128, 0, 255),
        "purple" => (128, 0, 128, 255),
        "red" => (255, 0, 0, 255),
        "silver" => (192, 192, 192, 255),
        "teal" => (0, 128, 128, 255),
        "white" => (255, 255, 255, 255),
        "yellow" => (255, 255, 0, 255),
        _ => return None,
    };
    Some(named)
}

/// Formats a color back to CSS for tooltip inline styles.
pub fn to_css(color: Color) -> String {
    let (r, g, b, a) = color;
    if a == 255 {
        format!("rgb({r}, {g}, {b})")
    } else {
        format!("rgba({r}, {g}, {b}, {:.3})", a as f32 / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_color, to_css};

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#fff"), Some((255, 255, 255, 255)));
        assert_eq!(parse_color("#282c34"), Some((40, 44, 52, 255)));
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!(parse_color("rgb(255, 255, 255)"), Some((255, 255, 255, 255)));
        assert_eq!(parse_color("rgba(0,0,0,0)"), Some((0, 0, 0, 0)));
        assert_eq!(parse_color("rgba(10, 20, 30, 1)"), Some((10, 20, 30, 255)));
        assert_eq!(parse_color("rgb(300, 0, 0)"), None);
    }

    #[test]
    fn parses_named_and_transparent() {
        assert_eq!(parse_color("White"), Some((255, 255, 255, 255)));
        assert_eq!(parse_color("transparent"), Some((0, 0, 0, 0)));
        assert_eq!(parse_color("blurple"), None);
    }

    #[test]
    fn css_output_round_trips_opaque_colors() {
        assert_eq!(to_css((40, 44, 52, 255)), "rgb(40, 44, 52)");
        assert_eq!(parse_color(&to_css((40, 44, 52, 255))), Some((40, 44, 52, 255)));
    }
}
