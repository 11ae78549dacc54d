//! Whiteboard drawing engine.
//!
//! Turns pointer and keyboard input into an ordered list of drawable elements with
//! undo/redo. Hosts feed events (or [`input::Command`]s) into an [`InputState`] and
//! render [`InputState::elements`] plus [`InputState::preview`]; nothing here draws
//! pixels. The configuration types are exported so external tools can share the
//! validation and serialization code with the main binary.

pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod util;

pub use config::Config;
pub use draw::{Canvas, CanvasHistory, Element, ElementId, ElementKind, Shape};
pub use error::BoardError;
pub use input::{Command, InputState, ToolKind};
