//! Hex color parsing for trend palettes.
//!
//! The trend service sends palettes as hex strings such as "#800080".
//! Anything that is not a six or three digit hex code is skipped.

use log::*;
use ratatui::style::Color;
use regex::Regex;
use std::sync::OnceLock;

fn hex_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$") {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Failed to compile hex color pattern: {}", e);
                None
            }
        })
        .as_ref()
}

/// Parse a hex color code into a terminal color.
///
/// # Arguments
/// * `code` - `#RRGGBB` or `#RGB`, the leading `#` optional
///
/// # Returns
/// The RGB color, or None when the code is malformed.
pub fn parse_hex(code: &str) -> Option<Color> {
    let caps = hex_pattern()?.captures(code.trim())?;
    let digits = caps.get(1)?.as_str();
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
