//! Commands accepted by the board from a host UI or a recorded script.

use super::events::{Key, buttons};
use super::tool::ToolKind;
use crate::draw::Color;
use serde::{Deserialize, Serialize};

/// Every operation a host can request, as one closed set.
///
/// Serialized internally tagged by `command`, e.g.
/// `{"command": "pointer_down", "x": 10, "y": 20}` or
/// `{"command": "set_stroke", "tool": "line", "color": "#ff0000"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Select the tool for the next gesture (`null` deselects)
    SetActiveTool { tool: Option<ToolKind> },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "primary_button")]
        buttons: u8,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default = "primary_button")]
        buttons: u8,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        buttons: u8,
    },
    KeyPress { key: Key },
    KeyRelease { key: Key },
    /// Presses each character of `text` in turn
    TypeText { text: String },
    Undo,
    Redo,
    ClearBoard,
    SetStroke { tool: ToolKind, color: Color },
    /// Set or clear (`null`) the fill of a rectangle or circle tool
    SetFill { tool: ToolKind, color: Option<Color> },
    SetSize { tool: ToolKind, size: f64 },
    SetEraserSize { size: f64 },
    SetFontFamily { tool: ToolKind, font_family: String },
}

fn primary_button() -> u8 {
    buttons::PRIMARY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;

    #[test]
    fn parses_pointer_commands_with_default_buttons() {
        let command: Command =
            serde_json::from_str(r#"{"command": "pointer_down", "x": 1, "y": 2.5}"#).unwrap();
        assert_eq!(
            command,
            Command::PointerDown {
                x: 1.0,
                y: 2.5,
                buttons: buttons::PRIMARY,
            }
        );
        let command: Command =
            serde_json::from_str(r#"{"command": "pointer_up", "x": 0, "y": 0}"#).unwrap();
        assert_eq!(
            command,
            Command::PointerUp {
                x: 0.0,
                y: 0.0,
                buttons: 0,
            }
        );
    }

    #[test]
    fn parses_style_and_key_commands() {
        let command: Command = serde_json::from_str(
            r#"{"command": "set_stroke", "tool": "rectangle", "color": "red"}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::SetStroke {
                tool: ToolKind::Rectangle,
                color: RED,
            }
        );

        let command: Command =
            serde_json::from_str(r#"{"command": "key_press", "key": {"Char": "z"}}"#).unwrap();
        assert_eq!(command, Command::KeyPress { key: Key::Char('z') });

        let command: Command = serde_json::from_str(r#"{"command": "undo"}"#).unwrap();
        assert_eq!(command, Command::Undo);
    }

    #[test]
    fn rejects_unknown_tools_and_commands() {
        assert!(
            serde_json::from_str::<Command>(r#"{"command": "set_active_tool", "tool": "lasso"}"#)
                .is_err()
        );
        assert!(serde_json::from_str::<Command>(r#"{"command": "explode"}"#).is_err());
    }
}
