//! Generic input event types passed in by the host UI.

use serde::{Deserialize, Serialize};

/// Generic key representation.
///
/// Hosts map their native key codes to these values. In command scripts a key is
/// written as its variant name (`"Escape"`) or `{"Char": "a"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// Home key
    Home,
    /// End key
    End,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Pointer button bits, as in DOM `MouseEvent.buttons`.
pub mod buttons {
    /// Primary (usually left) button
    pub const PRIMARY: u8 = 1;
    /// Secondary (usually right) button
    pub const SECONDARY: u8 = 2;
    /// Auxiliary (usually middle) button
    pub const AUXILIARY: u8 = 4;
}

/// Returns true when the primary button bit is set in `mask`.
pub fn primary_held(mask: u8) -> bool {
    mask & buttons::PRIMARY != 0
}
