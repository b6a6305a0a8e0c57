use crate::{
    Color, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, companion_for, is_readable, is_transparent,
};

/// Colors observed on one element of the ancestor chain, innermost first.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorSample {
    pub background: Option<Color>,
    pub foreground: Option<Color>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
}

/// Resolves a readable background/foreground pair from a chain of color
/// samples ordered from the code block outward.
///
/// Resolution order:
/// 1. the block's own pair, when it already contrasts;
/// 2. any ancestor text color that contrasts with the found background;
/// 3. a synthesized foreground picked by the background's luminance;
/// 4. a fixed default pair when no background exists anywhere in the chain.
pub fn resolve_theme(chain: &[ColorSample]) -> Theme {
    let background = chain
        .iter()
        .filter_map(|sample| sample.background)
        .find(|&bg| !is_transparent(bg));

    let Some(background) = background else {
        return Theme {
            background: DEFAULT_BACKGROUND,
            foreground: DEFAULT_FOREGROUND,
        };
    };

    let own_foreground = chain.iter().find_map(|sample| sample.foreground);
    if let Some(foreground) = own_foreground {
        if is_readable(background, foreground) {
            return Theme {
                background,
                foreground,
            };
        }
    }

    for sample in chain {
        if let Some(foreground) = sample.foreground {
            if is_readable(background, foreground) {
                return Theme {
                    background,
                    foreground,
                };
            }
        }
    }

    Theme {
        background,
        foreground: companion_for(background),
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorSample, Theme, resolve_theme};
    use crate::{Color, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, is_readable, relative_luminance};

    const WHITE: Color = (255, 255, 255, 255);
    const BLACK: Color = (0, 0, 0, 255);
    const NEAR_WHITE: Color = (240, 240, 240, 255);

    fn sample(background: Option<Color>, foreground: Option<Color>) -> ColorSample {
        ColorSample {
            background,
            foreground,
        }
    }

    #[test]
    fn contrasting_own_pair_is_used_verbatim() {
        let theme = resolve_theme(&[sample(Some(WHITE), Some(BLACK))]);
        assert_eq!(
            theme,
            Theme {
                background: WHITE,
                foreground: BLACK
            }
        );
    }

    #[test]
    fn background_is_found_on_an_ancestor_past_transparent_ones() {
        let chain = [
            sample(Some((0, 0, 0, 0)), Some(BLACK)),
            sample(None, None),
            sample(Some(WHITE), None),
        ];
        let theme = resolve_theme(&chain);
        assert_eq!(theme.background, WHITE);
        assert_eq!(theme.foreground, BLACK);
    }

    #[test]
    fn unreadable_own_pair_falls_back_to_ancestor_text_color() {
        let chain = [
            sample(Some(WHITE), Some(NEAR_WHITE)),
            sample(None, Some(BLACK)),
        ];
        let theme = resolve_theme(&chain);
        assert_eq!(theme.background, WHITE);
        assert_eq!(theme.foreground, BLACK);
    }

    #[test]
    fn synthesized_foreground_is_dark_on_light_background() {
        let theme = resolve_theme(&[sample(Some(WHITE), Some(NEAR_WHITE))]);
        assert_eq!(theme.background, WHITE);
        assert!(
            relative_luminance(theme.foreground) < 0.5,
            "expected a synthesized dark foreground, got {:?}",
            theme.foreground
        );
        assert!(is_readable(theme.background, theme.foreground));
    }

    #[test]
    fn synthesized_foreground_is_light_on_dark_background() {
        let dark: Color = (40, 44, 52, 255);
        let theme = resolve_theme(&[sample(Some(dark), None)]);
        assert_eq!(theme.background, dark);
        assert!(relative_luminance(theme.foreground) > 0.5);
    }

    #[test]
    fn missing_background_everywhere_uses_default_pair() {
        let theme = resolve_theme(&[sample(None, Some(BLACK)), sample(None, None)]);
        assert_eq!(theme.background, DEFAULT_BACKGROUND);
        assert_eq!(theme.foreground, DEFAULT_FOREGROUND);
    }
}
