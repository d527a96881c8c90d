//! Shared UI color constants and the bar palette.

use ratatui::style::Color;

pub const STATUS_BAR_BG: Color = Color::Rgb(30, 30, 30);
pub const FOOTER_BG: Color = Color::Rgb(25, 25, 25);
pub const KEY_HINT_BG: Color = Color::Rgb(60, 60, 60);

pub const TEXT_BRIGHT: Color = Color::Rgb(240, 240, 240);
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);
pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180);
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);
pub const TEXT_FAINT: Color = Color::Rgb(90, 90, 90);

pub const ACCENT_PRIMARY: Color = Color::Rgb(28, 114, 185);
pub const ACCENT_SUCCESS: Color = Color::Rgb(22, 163, 74);
pub const ACCENT_WARNING: Color = Color::Rgb(234, 179, 8);

/// Colors used to paint the bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarPalette {
    /// Bars with no annotation
    pub base: Color,
    /// Bars in their final position
    pub sorted: Color,
    /// Bars under comparison or being written
    pub active: Color,
}

impl Default for BarPalette {
    fn default() -> Self {
        Self {
            base: Color::Rgb(0x33, 0x41, 0x55),
            sorted: Color::Rgb(0x16, 0xa3, 0x4a),
            active: Color::Rgb(0x1c, 0x72, 0xb9),
        }
    }
}

/// Parse a hex color string to a Color.
///
/// Supports formats: "#RGB", "#RRGGBB", "#RRGGBBAA"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Alpha is ignored
        6 | 8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}
