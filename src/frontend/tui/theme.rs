//! Resolved colors for the roster screens

use crate::config::ThemeConfig;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterTheme {
    pub border: Color,
    pub text: Color,
    pub background: Color,
    pub label: Color,
    pub label_focused: Color,
    pub input_background: Color,
    pub error: Color,
    pub success: Color,
    pub muted: Color,
}

impl Default for RosterTheme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl RosterTheme {
    /// Unparseable entries fall back to the built-in palette
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            border: resolve(&config.border, Color::Cyan),
            text: resolve(&config.text, Color::White),
            background: resolve(&config.background, Color::Black),
            label: resolve(&config.label, Color::Cyan),
            label_focused: resolve(&config.label_focused, Color::Yellow),
            input_background: resolve(&config.input_background, Color::Rgb(64, 0, 0)),
            error: resolve(&config.error, Color::Red),
            success: resolve(&config.success, Color::Green),
            muted: Color::Gray,
        }
    }
}

fn resolve(value: &str, fallback: Color) -> Color {
    if value == "-" {
        return Color::Reset;
    }
    parse_hex_color(value).unwrap_or_else(|| {
        tracing::warn!("Invalid theme color '{}', using {:?}", value, fallback);
        fallback
    })
}

/// "#rrggbb" to an RGB color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    if hex.is_ascii() && hex.starts_with('#') && hex.len() == 7 {
        let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
        let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
        let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff5555"), Some(Color::Rgb(255, 85, 85)));
        assert_eq!(parse_hex_color("ff5555"), None);
        assert_eq!(parse_hex_color("#ff55"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_dash_and_garbage_entries() {
        let config = ThemeConfig {
            background: "-".to_string(),
            error: "crimson".to_string(),
            ..ThemeConfig::default()
        };
        let theme = RosterTheme::from_config(&config);
        assert_eq!(theme.background, Color::Reset);
        assert_eq!(theme.error, Color::Red);
        assert_eq!(theme.success, Color::Rgb(0x50, 0xfa, 0x7b));
    }
}
