// Theme system for the TUI
//
// Two themes: `light` (brand blue on white, the deck's native look) and
// `dark`. Every color the renderer uses comes from here.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    /// Parse from config; unknown names fall back to light
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "dark" => ThemeKind::Dark,
            _ => ThemeKind::Light,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Light => "light",
            ThemeKind::Dark => "dark",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Light => Theme::light(),
            ThemeKind::Dark => Theme::dark(),
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,

    pub background: Color,
    pub foreground: Color,
    /// Subtitles, placeholders, footer
    pub muted: Color,
    /// Brand color: headings, gauge, buttons
    pub accent: Color,
    /// Text drawn on top of `accent`
    pub on_accent: Color,
    pub code: Color,

    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    pub disabled: Color,
    pub gauge_track: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub debug: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Neurobotix blue
const BRAND: Color = Color::Rgb(77, 160, 196);

impl Theme {
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            background: Color::Rgb(255, 255, 255),
            foreground: Color::Rgb(31, 41, 55),
            muted: Color::Rgb(107, 114, 128),
            accent: BRAND,
            on_accent: Color::Rgb(255, 255, 255),
            code: Color::Rgb(30, 94, 124),
            border: Color::Rgb(209, 213, 219),
            border_focused: BRAND,
            border_type: BorderType::Rounded,
            disabled: Color::Rgb(209, 213, 219),
            gauge_track: Color::Rgb(229, 231, 235),
            success: Color::Rgb(22, 163, 74),
            warning: Color::Rgb(202, 138, 4),
            error: Color::Rgb(220, 38, 38),
            debug: Color::Rgb(107, 114, 128),
        }
    }

    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            background: Color::Rgb(17, 24, 39),
            foreground: Color::Rgb(229, 231, 235),
            muted: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(103, 186, 222),
            on_accent: Color::Rgb(17, 24, 39),
            code: Color::Rgb(147, 210, 236),
            border: Color::Rgb(55, 65, 81),
            border_focused: Color::Rgb(103, 186, 222),
            border_type: BorderType::Rounded,
            disabled: Color::Rgb(75, 85, 99),
            gauge_track: Color::Rgb(55, 65, 81),
            success: Color::Rgb(74, 222, 128),
            warning: Color::Rgb(250, 204, 21),
            error: Color::Rgb(248, 113, 113),
            debug: Color::Rgb(156, 163, 175),
        }
    }
}

/// Blend `color` toward `background` as opacity drops to 0
///
/// Only RGB pairs blend; anything else snaps at half opacity.
pub fn fade(color: Color, background: Color, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |c: u8, base: u8| -> u8 {
                (base as f64 + (c as f64 - base as f64) * opacity).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ if opacity >= 0.5 => color,
        _ => background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_name_is_light() {
        assert_eq!(ThemeKind::from_name("Dark"), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_name("solarized"), ThemeKind::Light);
        assert_eq!(ThemeKind::Light.toggle(), ThemeKind::Dark);
    }

    #[test]
    fn fade_blends_rgb_toward_background() {
        let white = Color::Rgb(255, 255, 255);
        let black = Color::Rgb(0, 0, 0);
        assert_eq!(fade(black, white, 1.0), black);
        assert_eq!(fade(black, white, 0.0), white);
        assert_eq!(fade(black, white, 0.5), Color::Rgb(128, 128, 128));
    }

    #[test]
    fn fade_snaps_named_colors() {
        assert_eq!(fade(Color::Red, Color::Reset, 0.7), Color::Red);
        assert_eq!(fade(Color::Red, Color::Reset, 0.2), Color::Reset);
    }
}
