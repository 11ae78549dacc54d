//! RGBA color type and the whiteboard palette.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum). Colors serialize as
/// `#rrggbb` hex strings (`#rrggbbaa` when not fully opaque), which is also what the
/// command script and the element dump use.
///
/// # Examples
///
/// ```
/// use sketchboard::draw::Color;
/// let red: Color = "#ff0000".parse().unwrap();
/// assert_eq!(red, Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 });
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();

        match digits.len() {
            3 => {
                let expand = |i: usize| {
                    u8::from_str_radix(&digits[i..=i], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Self::from_rgb8(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => {
                let mut color = Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?);
                color.a = f64::from(channel(6..8)?) / 255.0;
                Some(color)
            }
            _ => None,
        }
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when alpha is below 1.0.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        }
    }
}

impl FromStr for Color {
    type Err = BoardError;

    /// Accepts palette names (see [`crate::util::name_to_color`]) or hex notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::util::name_to_color(s)
            .or_else(|| Self::from_hex(s))
            .ok_or_else(|| BoardError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Black (#000000), the default stroke for every tool.
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Red (#ff0000)
pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Green (#00ff00)
pub const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Blue (#0000ff)
pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Yellow (#ffff00)
pub const YELLOW: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Purple (#800080)
pub const PURPLE: Color = Color {
    r: 128.0 / 255.0,
    g: 0.0,
    b: 128.0 / 255.0,
    a: 1.0,
};

/// Orange (#ffa500)
pub const ORANGE: Color = Color {
    r: 1.0,
    g: 165.0 / 255.0,
    b: 0.0,
    a: 1.0,
};

/// Pink (#ffc0cb)
pub const PINK: Color = Color {
    r: 1.0,
    g: 192.0 / 255.0,
    b: 203.0 / 255.0,
    a: 1.0,
};

/// White (#ffffff)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Swatch order shown by toolbox UIs.
pub const PALETTE: [Color; 9] = [BLACK, RED, GREEN, BLUE, YELLOW, PURPLE, ORANGE, PINK, WHITE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_palette() {
        assert_eq!(ORANGE.to_hex(), "#ffa500");
        assert_eq!(Color::from_hex("#ffc0cb"), Some(PINK));
        assert_eq!(Color::from_hex("800080"), Some(PURPLE));
    }

    #[test]
    fn short_and_alpha_hex_forms() {
        assert_eq!(Color::from_hex("#fff"), Some(WHITE));
        let translucent = Color::from_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(translucent.to_hex(), "#00000080");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(matches!(
            "chartreuse".parse::<Color>(),
            Err(BoardError::InvalidColor(_))
        ));
    }

    #[test]
    fn parses_names_and_serializes_as_hex() {
        let color: Color = "Blue".parse().unwrap();
        assert_eq!(color, BLUE);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#0000ff\"");
        let back: Color = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(back, RED);
    }
}
