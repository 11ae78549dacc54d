//! Configuration enum types.

use crate::draw::{BLACK, Color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How arrowhead legs are sized.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowLengthMode {
    /// Every arrow uses `arrow.length`
    Fixed,
    /// Leg length = stroke width × `arrow.factor`
    Proportional,
}

/// Color specification - a named color, a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// stroke_color = "purple"
///
/// # Hex notation
/// stroke_color = "#ffa500"
///
/// # Custom RGB color (0-255 per component)
/// stroke_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (black, red, green, blue, yellow, purple, orange, pink, white) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown names and malformed hex strings fall back to black with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => name.parse().unwrap_or_else(|_| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Returns true when [`Self::to_color`] would not need its fallback.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(name) => name.parse::<Color>().is_ok(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{ORANGE, PURPLE};

    #[test]
    fn converts_every_notation() {
        assert_eq!(ColorSpec::Name("purple".into()).to_color(), PURPLE);
        assert_eq!(ColorSpec::Name("#ffa500".into()).to_color(), ORANGE);
        assert_eq!(ColorSpec::Rgb([255, 165, 0]).to_color(), ORANGE);
    }

    #[test]
    fn unknown_names_fall_back_to_black() {
        let spec = ColorSpec::Name("mauve-ish".into());
        assert!(!spec.is_valid());
        assert_eq!(spec.to_color(), BLACK);
    }
}
