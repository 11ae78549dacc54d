//! Drawing primitives: colors, fonts, elements, canvas snapshots and history.
//!
//! This module defines the core data model of the whiteboard:
//! - [`Color`]: RGBA color representation with the palette constants
//! - [`Element`]: a drawable element (line, rectangle, circle, arrow, brush, text)
//! - [`Canvas`]: ordered, shareable snapshot of finalized elements
//! - [`CanvasHistory`]: undo/redo timeline of canvas snapshots
//! - [`freehand`]: stroke-to-outline conversion for brush strokes

pub mod canvas;
pub mod color;
pub mod element;
pub mod font;
pub mod freehand;
pub mod history;

// Re-export commonly used types at module level
pub use canvas::Canvas;
pub use color::Color;
pub use element::{
    ArrowLengthPolicy, BrushStroke, Element, ElementId, ElementKind, ElementSettings, Shape,
};
pub use font::{AverageAdvance, FONT_FAMILIES, TextMeasure};
pub use history::CanvasHistory;

pub use color::{BLACK, BLUE, GREEN, ORANGE, PALETTE, PINK, PURPLE, RED, WHITE, YELLOW};
