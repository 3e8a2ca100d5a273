use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Progress gauge
    pub gauge_filled: ColorSpec,
    pub gauge_empty: ColorSpec,

    // Footer mode colors
    pub footer_normal: ColorSpec,
    pub footer_edit: ColorSpec,
    pub footer_delete: ColorSpec,
    pub footer_timer: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::loom()
    }
}

impl Theme {
    /// Royal purple and zari gold on a dark ground.
    ///
    pub fn loom() -> Self {
        Theme {
            name: "loom".to_string(),
            primary: ColorSpec::rgb(155, 89, 182),   // Royal purple
            secondary: ColorSpec::rgb(212, 175, 55), // Zari gold
            accent: ColorSpec::rgb(230, 126, 34),    // Amber
            text: ColorSpec::rgb(236, 230, 240),
            text_muted: ColorSpec::rgb(150, 140, 160),
            success: ColorSpec::rgb(46, 204, 113),
            warning: ColorSpec::rgb(241, 196, 15),
            error: ColorSpec::rgb(231, 76, 60),
            info: ColorSpec::rgb(52, 152, 219),
            border_active: ColorSpec::rgb(212, 175, 55),
            border_normal: ColorSpec::rgb(96, 80, 110),
            highlight_bg: ColorSpec::rgb(74, 35, 90),
            highlight_fg: ColorSpec::rgb(255, 255, 255),
            gauge_filled: ColorSpec::rgb(155, 89, 182),
            gauge_empty: ColorSpec::rgb(60, 50, 70),
            footer_normal: ColorSpec::rgb(74, 35, 90),
            footer_edit: ColorSpec::rgb(160, 120, 20),
            footer_delete: ColorSpec::rgb(192, 57, 43),
            footer_timer: ColorSpec::rgb(39, 174, 96),
        }
    }

    /// Indigo dye and undyed cotton.
    ///
    pub fn indigo() -> Self {
        Theme {
            name: "indigo".to_string(),
            primary: ColorSpec::rgb(63, 81, 181),
            secondary: ColorSpec::rgb(240, 234, 214), // Cotton
            accent: ColorSpec::rgb(0, 150, 136),
            text: ColorSpec::rgb(232, 234, 246),
            text_muted: ColorSpec::rgb(140, 150, 180),
            success: ColorSpec::rgb(102, 187, 106),
            warning: ColorSpec::rgb(255, 202, 40),
            error: ColorSpec::rgb(239, 83, 80),
            info: ColorSpec::rgb(79, 195, 247),
            border_active: ColorSpec::rgb(121, 134, 203),
            border_normal: ColorSpec::rgb(57, 73, 171),
            highlight_bg: ColorSpec::rgb(26, 35, 126),
            highlight_fg: ColorSpec::rgb(255, 255, 255),
            gauge_filled: ColorSpec::rgb(92, 107, 192),
            gauge_empty: ColorSpec::rgb(40, 44, 80),
            footer_normal: ColorSpec::rgb(26, 35, 126),
            footer_edit: ColorSpec::rgb(0, 121, 107),
            footer_delete: ColorSpec::rgb(183, 28, 28),
            footer_timer: ColorSpec::rgb(46, 125, 50),
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "loom" => Some(Self::loom()),
            "indigo" => Some(Self::indigo()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec!["loom".to_string(), "indigo".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_covers_available_themes() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::from_name(&name).map(|t| t.name), Some(name));
        }
        assert!(Theme::from_name("plaid").is_none());
        assert_eq!(Theme::default().name, "loom");
    }
}
