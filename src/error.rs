//! Error taxonomy for the drawing engine.

use crate::input::ToolKind;
use thiserror::Error;

/// Errors raised by the element model, tool-style registry and state machine.
///
/// Only [`BoardError::UnrecognizedToolKind`], [`BoardError::UnsupportedStyle`] and
/// [`BoardError::InvalidColor`] ever reach callers of the public input handlers. Gesture
/// races and blank text commits are logged and swallowed inside [`crate::input::InputState`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoardError {
    /// Tool name could not be parsed, or the tool has no element kind (the eraser).
    #[error("unrecognized tool kind: {0}")]
    UnrecognizedToolKind(String),

    /// Pointer event arrived in a state that cannot consume it.
    #[error("{event} ignored while {state}")]
    InvalidGestureState {
        event: &'static str,
        state: &'static str,
    },

    /// Text edit finished with blank content.
    #[error("text commit with empty content")]
    EmptyCommit,

    /// The tool has no such style property (e.g. fill on a line).
    #[error("tool {tool} has no {property} setting")]
    UnsupportedStyle {
        tool: ToolKind,
        property: &'static str,
    },

    /// Color text was neither a palette name nor `#rrggbb[aa]`.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
