//! Input handling and tool state machine.
//!
//! This module translates host pointer and keyboard events into drawing actions.
//! It maintains the active tool, the per-tool styles, and the state machine for the
//! different gesture modes (idle, drawing, erasing, text input).

pub mod command;
pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;
pub mod toolbox;

// Re-export commonly used types at module level
pub use command::Command;
pub use events::{Key, buttons};
pub use modifiers::Modifiers;
pub use state::{DrawingState, InputState, TextEdit};
pub use tool::ToolKind;
pub use toolbox::{ToolStyle, ToolStyleRegistry};
