//! Per-tool style settings consulted when elements are created.

use super::tool::ToolKind;
use crate::draw::font::{DEFAULT_FONT_FAMILY, find_font_family};
use crate::draw::{BLACK, Color};
use crate::error::BoardError;
use std::collections::HashMap;

/// Style applied to the next element a tool creates.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolStyle {
    /// Outline / text color
    pub stroke: Color,
    /// Interior color (rectangle and circle only)
    pub fill: Option<Color>,
    /// Stroke width, brush diameter, font size or eraser diameter depending on tool
    pub size: f64,
    /// Font family (text only)
    pub font_family: Option<String>,
}

/// Valid size range and default size for a tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl SizeRange {
    pub fn clamp(&self, size: f64) -> f64 {
        size.clamp(self.min, self.max)
    }
}

/// Size limits for `tool`.
///
/// - Text: 12-100, default 24
/// - Eraser: 5-50, default 20
/// - Brush: 1-20, default 2
/// - Line, rectangle, circle, arrow: 1-20, default 1
pub fn size_range(tool: ToolKind) -> SizeRange {
    match tool {
        ToolKind::Text => SizeRange {
            min: 12.0,
            max: 100.0,
            default: 24.0,
        },
        ToolKind::Eraser => SizeRange {
            min: 5.0,
            max: 50.0,
            default: 20.0,
        },
        ToolKind::Brush => SizeRange {
            min: 1.0,
            max: 20.0,
            default: 2.0,
        },
        ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Arrow => SizeRange {
            min: 1.0,
            max: 20.0,
            default: 1.0,
        },
    }
}

/// Size step used by the increase/decrease size shortcuts.
pub fn size_step(tool: ToolKind) -> f64 {
    match tool {
        ToolKind::Text => 2.0,
        _ => 1.0,
    }
}

/// Every tool but the eraser has a stroke color.
pub fn supports_stroke(tool: ToolKind) -> bool {
    tool != ToolKind::Eraser
}

pub fn supports_fill(tool: ToolKind) -> bool {
    matches!(tool, ToolKind::Rectangle | ToolKind::Circle)
}

pub fn supports_font(tool: ToolKind) -> bool {
    tool == ToolKind::Text
}

/// Style store holding one [`ToolStyle`] per tool.
///
/// Initialized once at start-up and changed only through the setters below; drawing
/// never resets it.
#[derive(Debug, Clone)]
pub struct ToolStyleRegistry {
    styles: HashMap<ToolKind, ToolStyle>,
}

impl Default for ToolStyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolStyleRegistry {
    /// Creates a registry with black strokes, no fill and default sizes.
    pub fn new() -> Self {
        let styles = ToolKind::ALL
            .into_iter()
            .map(|tool| {
                let style = ToolStyle {
                    stroke: BLACK,
                    fill: None,
                    size: size_range(tool).default,
                    font_family: supports_font(tool).then(|| DEFAULT_FONT_FAMILY.to_string()),
                };
                (tool, style)
            })
            .collect();
        Self { styles }
    }

    /// Current style for `tool`.
    pub fn get(&self, tool: ToolKind) -> &ToolStyle {
        // Every tool is inserted by `new` and never removed
        &self.styles[&tool]
    }

    fn get_mut(&mut self, tool: ToolKind) -> &mut ToolStyle {
        self.styles
            .entry(tool)
            .or_insert_with(|| ToolStyle {
                stroke: BLACK,
                fill: None,
                size: size_range(tool).default,
                font_family: None,
            })
    }

    pub fn set_stroke(&mut self, tool: ToolKind, color: Color) -> Result<(), BoardError> {
        if !supports_stroke(tool) {
            return Err(BoardError::UnsupportedStyle {
                tool,
                property: "stroke",
            });
        }
        self.get_mut(tool).stroke = color;
        Ok(())
    }

    /// Sets or clears the fill color (rectangle and circle only).
    pub fn set_fill(&mut self, tool: ToolKind, color: Option<Color>) -> Result<(), BoardError> {
        if !supports_fill(tool) {
            return Err(BoardError::UnsupportedStyle {
                tool,
                property: "fill",
            });
        }
        self.get_mut(tool).fill = color;
        Ok(())
    }

    /// Sets the size, clamped to the tool's range. Returns the size actually stored.
    pub fn set_size(&mut self, tool: ToolKind, size: f64) -> f64 {
        let range = size_range(tool);
        let clamped = if size.is_finite() {
            range.clamp(size)
        } else {
            range.default
        };
        if clamped != size {
            log::debug!("Clamped {} size {} to {}", tool, size, clamped);
        }
        self.get_mut(tool).size = clamped;
        clamped
    }

    /// Changes the size by `delta`, clamped to the tool's range.
    pub fn adjust_size(&mut self, tool: ToolKind, delta: f64) -> f64 {
        let current = self.get(tool).size;
        self.set_size(tool, current + delta)
    }

    /// Sets the font family (text only). Families outside the known table are kept
    /// but logged, since the host may have more fonts installed.
    pub fn set_font_family(&mut self, tool: ToolKind, family: &str) -> Result<(), BoardError> {
        if !supports_font(tool) {
            return Err(BoardError::UnsupportedStyle {
                tool,
                property: "font_family",
            });
        }
        let family = family.trim();
        let name = match find_font_family(family) {
            Some(known) => known.name.to_string(),
            None => {
                log::warn!("Unknown font family '{}', keeping it as given", family);
                family.to_string()
            }
        };
        self.get_mut(tool).font_family = Some(name);
        Ok(())
    }
}
