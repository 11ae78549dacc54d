//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for all actions in the application.

use crate::input::ToolKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Cancellation
    Cancel,

    // History
    Undo,
    Redo,
    ClearBoard,

    // Tool selection
    SelectBrush,
    SelectLine,
    SelectRectangle,
    SelectCircle,
    SelectArrow,
    SelectEraser,
    SelectText,

    // Size controls (apply to the active tool)
    IncreaseSize,
    DecreaseSize,
}

impl Action {
    /// Tool chosen by a `Select*` action.
    pub fn selected_tool(self) -> Option<ToolKind> {
        match self {
            Action::SelectBrush => Some(ToolKind::Brush),
            Action::SelectLine => Some(ToolKind::Line),
            Action::SelectRectangle => Some(ToolKind::Rectangle),
            Action::SelectCircle => Some(ToolKind::Circle),
            Action::SelectArrow => Some(ToolKind::Arrow),
            Action::SelectEraser => Some(ToolKind::Eraser),
            Action::SelectText => Some(ToolKind::Text),
            _ => None,
        }
    }
}

/// A single keybinding: a key character with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+W" or "Escape".
    /// Modifiers can appear in any order: "Shift+Ctrl+W", "Alt+Shift+Ctrl+W", etc.
    /// Supports spaces around '+' (e.g., "Ctrl + Shift + W")
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        // Normalize by removing spaces around '+'
        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        // Split on '+' to get all parts
        let parts: Vec<&str> = s_normalized.split('+').collect();

        if parts.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        // Process each part, checking if it's a modifier or the actual key
        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => {
                    // Not a modifier, so it's part of the key
                    key_parts.push(part);
                }
            }
        }

        // Reconstruct the key from remaining parts (handles cases like "+" being the key)
        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // Join with '+' to handle the case where the key itself is '+'
        // (e.g., "Ctrl+Shift++" becomes ["Ctrl", "Shift", "", ""] with last two being the '+' key)
        let key = key_parts.join("+");

        if key.is_empty() {
            // This happens for "Ctrl+Shift++" where we have empty strings after the modifiers
            // The key is actually '+'
            Ok(Self {
                key: "+".to_string(),
                ctrl,
                shift,
                alt,
            })
        } else {
            Ok(Self {
                key,
                ctrl,
                shift,
                alt,
            })
        }
    }

    /// Check if this keybinding matches the current input state.
    ///
    /// Symbol keys bound without Shift (`+`, `_`, ...) also match while Shift is held,
    /// since many layouts need Shift to type them.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && (self.shift == shift || (!self.shift && self.is_symbol()))
            && self.alt == alt
    }

    /// Exact match including Shift; preferred over a Shift-tolerant symbol match.
    pub fn matches_exactly(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.matches(key, ctrl, shift, alt) && self.shift == shift
    }

    fn is_symbol(&self) -> bool {
        let mut chars = self.key.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some(c), None) if c.is_ascii_punctuation()
        )
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// cancel = ["Escape"]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Shift+Z", "Ctrl+Y"]
/// select_rectangle = ["R"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_clear_board")]
    pub clear_board: Vec<String>,

    #[serde(default = "default_select_brush")]
    pub select_brush: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_circle")]
    pub select_circle: Vec<String>,

    #[serde(default = "default_select_arrow")]
    pub select_arrow: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_select_text")]
    pub select_text: Vec<String>,

    #[serde(default = "default_increase_size")]
    pub increase_size: Vec<String>,

    #[serde(default = "default_decrease_size")]
    pub decrease_size: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            cancel: default_cancel(),
            undo: default_undo(),
            redo: default_redo(),
            clear_board: default_clear_board(),
            select_brush: default_select_brush(),
            select_line: default_select_line(),
            select_rectangle: default_select_rectangle(),
            select_circle: default_select_circle(),
            select_arrow: default_select_arrow(),
            select_eraser: default_select_eraser(),
            select_text: default_select_text(),
            increase_size: default_increase_size(),
            decrease_size: default_decrease_size(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        // Helper closure to insert and check for duplicates
        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), String> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing_action) = map.insert(binding.clone(), action) {
                return Err(format!(
                    "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                    binding_str, existing_action, action
                ));
            }
            Ok(())
        };

        let groups: [(&[String], Action); 13] = [
            (&self.cancel, Action::Cancel),
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.clear_board, Action::ClearBoard),
            (&self.select_brush, Action::SelectBrush),
            (&self.select_line, Action::SelectLine),
            (&self.select_rectangle, Action::SelectRectangle),
            (&self.select_circle, Action::SelectCircle),
            (&self.select_arrow, Action::SelectArrow),
            (&self.select_eraser, Action::SelectEraser),
            (&self.select_text, Action::SelectText),
            (&self.increase_size, Action::IncreaseSize),
            (&self.decrease_size, Action::DecreaseSize),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                insert_binding(binding_str, action)?;
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string(), "Ctrl+Y".to_string()]
}

fn default_clear_board() -> Vec<String> {
    vec!["Ctrl+Shift+X".to_string()]
}

fn default_select_brush() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_select_line() -> Vec<String> {
    vec!["L".to_string()]
}

fn default_select_rectangle() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_select_circle() -> Vec<String> {
    vec!["C".to_string()]
}

fn default_select_arrow() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_select_text() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_increase_size() -> Vec<String> {
    vec!["+".to_string(), "=".to_string()]
}

fn default_decrease_size() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_shift_key() {
        let binding = KeyBinding::parse("Ctrl+Shift+W").unwrap();
        assert_eq!(binding.key, "W");
        assert!(binding.ctrl);
        assert!(binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_all_modifiers() {
        let binding = KeyBinding::parse("Ctrl+Shift+Alt+A").unwrap();
        assert_eq!(binding.key, "A");
        assert!(binding.ctrl);
        assert!(binding.shift);
        assert!(binding.alt);
    }

    #[test]
    fn test_parse_case_insensitive() {
        let binding = KeyBinding::parse("ctrl+shift+w").unwrap();
        assert_eq!(binding.key, "w");
        assert!(binding.ctrl);
        assert!(binding.shift);
    }

    #[test]
    fn test_parse_with_spaces() {
        let binding = KeyBinding::parse("Ctrl + Shift + W").unwrap();
        assert_eq!(binding.key, "W");
        assert!(binding.ctrl);
        assert!(binding.shift);
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Shift+W").unwrap();
        assert!(binding.matches("W", true, true, false));
        assert!(binding.matches("w", true, true, false)); // Case insensitive
        assert!(!binding.matches("W", false, true, false)); // Missing ctrl
        assert!(!binding.matches("W", true, false, false)); // Missing shift
        assert!(!binding.matches("A", true, true, false)); // Wrong key
    }

    #[test]
    fn test_symbol_bindings_tolerate_shift() {
        let plus = KeyBinding::parse("+").unwrap();
        assert!(plus.matches("+", false, false, false));
        assert!(plus.matches("+", false, true, false));
        assert!(!plus.matches_exactly("+", false, true, false));
        assert!(!plus.matches("+", true, true, false)); // Ctrl still required to match

        let letter = KeyBinding::parse("R").unwrap();
        assert!(!letter.matches("R", false, true, false));

        let shifted = KeyBinding::parse("Shift+-").unwrap();
        assert!(!shifted.matches("-", false, false, false));
    }

    #[test]
    fn test_parse_modifier_order_independence() {
        // Test that modifiers can appear in any order
        let binding1 = KeyBinding::parse("Ctrl+Shift+W").unwrap();
        let binding2 = KeyBinding::parse("Shift+Ctrl+W").unwrap();

        assert_eq!(binding1.key, "W");
        assert_eq!(binding2.key, "W");
        assert_eq!(binding1.ctrl, binding2.ctrl);
        assert_eq!(binding1.shift, binding2.shift);
        assert_eq!(binding1.alt, binding2.alt);
        assert!(binding1.ctrl);
        assert!(binding1.shift);

        // Test three modifiers in different orders
        let binding3 = KeyBinding::parse("Ctrl+Alt+Shift+W").unwrap();
        let binding4 = KeyBinding::parse("Shift+Alt+Ctrl+W").unwrap();
        let binding5 = KeyBinding::parse("Alt+Shift+Ctrl+W").unwrap();

        assert_eq!(binding3.key, "W");
        assert_eq!(binding4.key, "W");
        assert_eq!(binding5.key, "W");
        assert!(binding3.ctrl && binding3.shift && binding3.alt);
        assert!(binding4.ctrl && binding4.shift && binding4.alt);
        assert!(binding5.ctrl && binding5.shift && binding5.alt);
    }

    #[test]
    fn test_build_action_map() {
        let config = KeybindingsConfig::default();
        let map = config.build_action_map().unwrap();

        // Check that some default bindings are present
        let escape = KeyBinding::parse("Escape").unwrap();
        assert_eq!(map.get(&escape), Some(&Action::Cancel));

        let ctrl_z = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(map.get(&ctrl_z), Some(&Action::Undo));

        let ctrl_shift_z = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(map.get(&ctrl_shift_z), Some(&Action::Redo));

        let r = KeyBinding::parse("R").unwrap();
        assert_eq!(map.get(&r), Some(&Action::SelectRectangle));
        assert_eq!(Action::SelectRectangle.selected_tool(), Some(ToolKind::Rectangle));
        assert_eq!(Action::Undo.selected_tool(), None);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl+Shift++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl && binding.shift);
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        // Create a config with duplicate keybindings
        let mut config = KeybindingsConfig::default();
        config.cancel = vec!["Ctrl+Z".to_string()];
        config.undo = vec!["Ctrl+Z".to_string()];

        // This should fail with a duplicate error
        let result = config.build_action_map();
        assert!(result.is_err());
        let err_msg = result.unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
        assert!(err_msg.contains("Ctrl+Z"));
    }

    #[test]
    fn test_invalid_binding_is_reported() {
        let mut config = KeybindingsConfig::default();
        config.undo = vec!["Ctrl+Shift".to_string()];
        assert!(config.build_action_map().is_err());
    }

    #[test]
    fn test_duplicate_with_different_modifier_order() {
        // Even with different modifier orders, these are the same keybinding
        let mut config = KeybindingsConfig::default();
        config.redo = vec!["Ctrl+Shift+W".to_string()];
        config.clear_board = vec!["Shift+Ctrl+W".to_string()];

        // This should fail because they normalize to the same binding
        let result = config.build_action_map();
        assert!(result.is_err());
        let err_msg = result.unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
    }
}
