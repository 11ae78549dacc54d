//! Drawing tool selection.

use crate::draw::ElementKind;
use crate::error::BoardError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines what is created (or removed) by the next pointer gesture.
/// Every tool except the eraser constructs exactly one [`ElementKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Freehand stroke that follows the pointer
    Brush,
    /// Straight line between press and release points
    Line,
    /// Axis-aligned rectangle from corner to corner
    Rectangle,
    /// Circle from centre outward
    Circle,
    /// Line with an arrowhead at the release point
    Arrow,
    /// Removes the topmost element under the pointer
    Eraser,
    /// Click to place or edit text
    Text,
}

impl ToolKind {
    /// Every tool, in toolbar order.
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Brush,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Arrow,
        ToolKind::Eraser,
        ToolKind::Text,
    ];

    /// Element kind constructed by this tool; `None` for the eraser.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            ToolKind::Brush => Some(ElementKind::Brush),
            ToolKind::Line => Some(ElementKind::Line),
            ToolKind::Rectangle => Some(ElementKind::Rectangle),
            ToolKind::Circle => Some(ElementKind::Circle),
            ToolKind::Arrow => Some(ElementKind::Arrow),
            ToolKind::Eraser => None,
            ToolKind::Text => Some(ElementKind::Text),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Arrow => "arrow",
            ToolKind::Eraser => "eraser",
            ToolKind::Text => "text",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| BoardError::UnrecognizedToolKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Rectangle".parse::<ToolKind>(), Ok(ToolKind::Rectangle));
        assert_eq!(" eraser ".parse::<ToolKind>(), Ok(ToolKind::Eraser));
        assert_eq!(
            "lasso".parse::<ToolKind>(),
            Err(BoardError::UnrecognizedToolKind("lasso".to_string()))
        );
    }

    #[test]
    fn only_the_eraser_lacks_an_element_kind() {
        for tool in ToolKind::ALL {
            assert_eq!(tool.element_kind().is_none(), tool == ToolKind::Eraser);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&ToolKind::Arrow).unwrap(), "\"arrow\"");
        let tool: ToolKind = serde_json::from_str("\"circle\"").unwrap();
        assert_eq!(tool, ToolKind::Circle);
    }
}
