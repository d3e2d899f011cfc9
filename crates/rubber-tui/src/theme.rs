use ratatui::style::Color;
use rubber_core::StyleConfig;
use tracing::warn;

/// Runtime colors for the indicator and the surrounding chrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Indicator colors, taken from the style
    pub background: Color,
    pub small_marker: Color,
    pub main_marker: Color,

    // Chrome
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey1: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_style(&StyleConfig::default())
    }
}

impl Theme {
    /// Build a theme from the style colors, keeping the defaults for any
    /// color that fails to parse
    pub fn from_style(style: &StyleConfig) -> Self {
        let defaults = StyleConfig::default();

        Self {
            background: color_or_default(
                "background_color",
                &style.background_color,
                &defaults.background_color,
            ),
            small_marker: color_or_default(
                "small_marker_color",
                &style.small_marker_color,
                &defaults.small_marker_color,
            ),
            main_marker: color_or_default(
                "main_marker_color",
                &style.main_marker_color,
                &defaults.main_marker_color,
            ),
            // Gruvbox dark chrome
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}

fn color_or_default(name: &str, hex: &str, fallback: &str) -> Color {
    parse_hex_color(hex).unwrap_or_else(|| {
        warn!("Invalid {} '{}', using {}", name, hex, fallback);
        parse_hex_color(fallback).unwrap_or(Color::Reset)
    })
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Full form: RRGGBB
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}
