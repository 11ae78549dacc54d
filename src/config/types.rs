//! Configuration type definitions.

use super::enums::{ArrowLengthMode, ColorSpec};
use crate::draw::element::{ArrowLengthPolicy, DEFAULT_ARROW_FACTOR, DEFAULT_ARROW_LENGTH};
use crate::draw::font::DEFAULT_FONT_FAMILY;
use crate::draw::freehand::{StrokeEnd, StrokeOptions};
use crate::input::ToolKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool styles the board starts with. Styles can be changed at runtime
/// through style commands and the size keybindings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool active at start-up (brush, line, rectangle, circle, arrow, eraser, text)
    #[serde(default = "default_tool")]
    pub default_tool: ToolKind,

    /// Stroke color for every tool - a named color, `#rrggbb`, or an RGB array like
    /// `[255, 0, 0]`
    #[serde(default = "default_stroke_color")]
    pub stroke_color: ColorSpec,

    /// Fill color for rectangles and circles (unset = no fill)
    #[serde(default)]
    pub fill_color: Option<ColorSpec>,

    /// Stroke width for lines, rectangles, circles and arrows (valid range: 1.0 - 20.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Brush diameter (valid range: 1.0 - 20.0)
    #[serde(default = "default_brush_size")]
    pub brush_size: f64,

    /// Font size for text (valid range: 12.0 - 100.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Font family for text (e.g. "Caveat", "Arial", "Courier New")
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            stroke_color: default_stroke_color(),
            fill_color: None,
            stroke_width: default_stroke_width(),
            brush_size: default_brush_size(),
            font_size: default_font_size(),
            font_family: default_font_family(),
        }
    }
}

/// Arrow drawing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead sizing: "fixed" uses `length`, "proportional" uses stroke width × `factor`
    #[serde(default = "default_arrow_mode")]
    pub mode: ArrowLengthMode,

    /// Arrowhead leg length in canvas units (valid range: 5.0 - 100.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,

    /// Multiplier applied to the stroke width in proportional mode (valid range: 1.0 - 50.0)
    #[serde(default = "default_arrow_factor")]
    pub factor: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            mode: default_arrow_mode(),
            length: default_arrow_length(),
            factor: default_arrow_factor(),
        }
    }
}

impl ArrowConfig {
    pub fn policy(&self) -> ArrowLengthPolicy {
        match self.mode {
            ArrowLengthMode::Fixed => ArrowLengthPolicy::Fixed {
                length: self.length,
            },
            ArrowLengthMode::Proportional => ArrowLengthPolicy::Proportional {
                factor: self.factor,
            },
        }
    }
}

/// Eraser settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Eraser diameter; the hit tolerance is half of it (valid range: 5.0 - 50.0)
    #[serde(default = "default_eraser_size")]
    pub size: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            size: default_eraser_size(),
        }
    }
}

/// Freehand stroke shaping.
///
/// These map onto the outline algorithm's parameters. The brush diameter itself comes
/// from `drawing.brush_size`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// How much simulated pressure narrows the stroke (valid range: -1.0 - 1.0)
    #[serde(default = "default_brush_half")]
    pub thinning: f64,

    /// Outline point spacing as a fraction of size (valid range: 0.0 - 1.0)
    #[serde(default = "default_brush_half")]
    pub smoothing: f64,

    /// Pull of each sample toward the previous one (valid range: 0.0 - 1.0)
    #[serde(default = "default_brush_half")]
    pub streamline: f64,

    /// Derive pressure from pointer speed
    #[serde(default = "default_simulate_pressure")]
    pub simulate_pressure: bool,

    /// Taper and cap at the start of the stroke
    #[serde(default)]
    pub start: StrokeEnd,

    /// Taper and cap at the end of the stroke
    #[serde(default)]
    pub end: StrokeEnd,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            thinning: default_brush_half(),
            smoothing: default_brush_half(),
            streamline: default_brush_half(),
            simulate_pressure: default_simulate_pressure(),
            start: StrokeEnd::default(),
            end: StrokeEnd::default(),
        }
    }
}

impl BrushConfig {
    /// Outline options template; `size` is replaced by the brush style when drawing.
    pub fn stroke_options(&self) -> StrokeOptions {
        StrokeOptions {
            thinning: self.thinning,
            smoothing: self.smoothing,
            streamline: self.streamline,
            simulate_pressure: self.simulate_pressure,
            start: self.start,
            end: self.end,
            ..StrokeOptions::default()
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept (0 = unlimited)
    #[serde(default)]
    pub limit: usize,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_tool() -> ToolKind {
    ToolKind::Brush
}

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_brush_size() -> f64 {
    2.0
}

fn default_font_size() -> f64 {
    24.0
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_arrow_mode() -> ArrowLengthMode {
    ArrowLengthMode::Fixed
}

fn default_arrow_length() -> f64 {
    DEFAULT_ARROW_LENGTH
}

fn default_arrow_factor() -> f64 {
    DEFAULT_ARROW_FACTOR
}

fn default_eraser_size() -> f64 {
    20.0
}

fn default_brush_half() -> f64 {
    0.5
}

fn default_simulate_pressure() -> bool {
    true
}
