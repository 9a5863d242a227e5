// Theme configuration
// Supports: built-in dark and light looks, and custom JSON theme documents

use crate::error::ConfigError;
use crate::json;
use crate::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON-serializable theme document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThemeConfig {
    pub name: String,
    #[serde(default)]
    pub is_dark: bool,
    pub colors: ThemeColorsConfig,
}

/// JSON color definitions (hex strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThemeColorsConfig {
    // Base colors
    pub background: String,
    pub text: String,
    #[serde(default = "default_text_muted")]
    pub text_muted: String,

    // Chrome
    #[serde(default = "default_toolbar")]
    pub toolbar: String,
    #[serde(default = "default_thumbnail_bar")]
    pub thumbnail_bar: String,
    #[serde(default = "default_menu_background")]
    pub menu_background: String,

    // Viewer canvas
    pub accent: String,
    #[serde(default = "default_checkerboard_light")]
    pub checkerboard_light: String,
    #[serde(default = "default_checkerboard_dark")]
    pub checkerboard_dark: String,
}

fn default_text_muted() -> String {
    "#8b8b8b".into()
}
fn default_toolbar() -> String {
    "#282828".into()
}
fn default_thumbnail_bar() -> String {
    "#1e1e1e".into()
}
fn default_menu_background() -> String {
    "#2d2d2d".into()
}
fn default_checkerboard_light() -> String {
    "#3c3c3c".into()
}
fn default_checkerboard_dark() -> String {
    "#323232".into()
}

impl ThemeConfig {
    /// Load a theme document from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        json::read_file(path)
    }

    /// Resolve hex strings to runtime colors, substituting the built-in
    /// palette for any value that does not parse
    pub fn resolve(&self) -> ThemeColors {
        let base = if self.is_dark {
            ThemeColors::dark()
        } else {
            ThemeColors::light()
        };
        let hex = |text: &str, fallback: Color| hex_to_color(text).unwrap_or(fallback);

        ThemeColors {
            background: hex(&self.colors.background, base.background),
            text: hex(&self.colors.text, base.text),
            text_muted: hex(&self.colors.text_muted, base.text_muted),
            toolbar: hex(&self.colors.toolbar, base.toolbar),
            thumbnail_bar: hex(&self.colors.thumbnail_bar, base.thumbnail_bar),
            menu_background: hex(&self.colors.menu_background, base.menu_background),
            accent: hex(&self.colors.accent, base.accent),
            checkerboard_light: hex(&self.colors.checkerboard_light, base.checkerboard_light),
            checkerboard_dark: hex(&self.colors.checkerboard_dark, base.checkerboard_dark),
        }
    }
}

/// Runtime theme colors
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub toolbar: Color,
    pub thumbnail_bar: Color,
    pub menu_background: Color,
    pub accent: Color,
    pub checkerboard_light: Color,
    pub checkerboard_dark: Color,
}

impl ThemeColors {
    /// Built-in dark theme
    pub fn dark() -> Self {
        ThemeColors {
            background: Color::from_hex(0x1e1e1e),
            text: Color::from_hex(0xf0f0f0),
            text_muted: Color::from_hex(0x8b8b8b),
            toolbar: Color::from_hex(0x282828),
            thumbnail_bar: Color::from_hex(0x1e1e1e),
            menu_background: Color::from_hex(0x2d2d2d),
            accent: Color::from_hex(0x3b82f6),
            checkerboard_light: Color::from_hex(0x3c3c3c),
            checkerboard_dark: Color::from_hex(0x323232),
        }
    }

    /// Built-in light theme
    pub fn light() -> Self {
        ThemeColors {
            background: Color::from_hex(0xf8f8f8),
            text: Color::from_hex(0x1e1e1e),
            text_muted: Color::from_hex(0x6b6b6b),
            toolbar: Color::from_hex(0xececec),
            thumbnail_bar: Color::from_hex(0xf0f0f0),
            menu_background: Color::from_hex(0xffffff),
            accent: Color::from_hex(0x2563eb),
            checkerboard_light: Color::from_hex(0xffffff),
            checkerboard_dark: Color::from_hex(0xe5e5e5),
        }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` into a color
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
    let a = if hex.len() == 8 {
        u8::from_str_radix(&hex[6..8], 16).ok()? as f32 / 255.0
    } else {
        1.0
    };
    Some(Color::from_rgba(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let c = hex_to_color("#ff8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 0.0).abs() < 1e-6);
        assert!((c.a - 1.0).abs() < 1e-6);

        let c = hex_to_color("3b82f680").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);

        assert!(hex_to_color("#fff").is_none());
        assert!(hex_to_color("#gggggg").is_none());
    }

    #[test]
    fn minimal_theme_document_fills_defaults() {
        let theme: ThemeConfig = json::from_str(
            r##"{
                "Name": "Moonlight",
                "IsDark": true,
                "Colors": {
                    "Background": "#10141a",
                    "Text": "#e0e6f0",
                    "Accent": "#7aa2f7"
                }
            }"##,
        )
        .unwrap();
        assert_eq!(theme.name, "Moonlight");
        assert_eq!(theme.colors.toolbar, "#282828");
        assert_eq!(theme.colors.checkerboard_dark, "#323232");
    }

    #[test]
    fn mixed_case_theme_document_parses() {
        let theme: ThemeConfig = json::from_str(
            r##"{
                "name": "Paper",
                "colors": {
                    "BACKGROUND": "#ffffff",
                    "text": "#111111",
                    "ACCENT": "#2563eb"
                }
            }"##,
        )
        .unwrap();
        assert!(!theme.is_dark);
        assert_eq!(theme.colors.background, "#ffffff");
    }

    #[test]
    fn unparsable_color_falls_back_to_builtin() {
        let theme: ThemeConfig = json::from_str(
            r##"{
                "Name": "Broken",
                "IsDark": true,
                "Colors": {
                    "Background": "not-a-color",
                    "Text": "#e0e6f0",
                    "Accent": "#7aa2f7"
                }
            }"##,
        )
        .unwrap();
        let resolved = theme.resolve();
        let dark = ThemeColors::dark();
        assert_eq!(resolved.background, dark.background);
    }
}
