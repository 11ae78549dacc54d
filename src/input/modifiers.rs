//! Keyboard modifier state tracking.

use super::events::Key;

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt) are currently pressed. Used to match
/// keybindings and to tell Shift+Enter (newline) from Enter (commit) in text input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates modifier state for a press or release of `key`.
    ///
    /// Returns true when `key` was a modifier.
    pub fn update(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift => self.shift = pressed,
            Key::Ctrl => self.ctrl = pressed,
            Key::Alt => self.alt = pressed,
            _ => return false,
        }
        true
    }

    /// True when Ctrl or Alt is held (keys typed then are shortcuts, not text).
    pub fn command_held(&self) -> bool {
        self.ctrl || self.alt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_press_and_release() {
        let mut modifiers = Modifiers::new();
        assert!(modifiers.update(Key::Ctrl, true));
        assert!(modifiers.update(Key::Shift, true));
        assert!(modifiers.ctrl && modifiers.shift);
        assert!(modifiers.command_held());
        modifiers.update(Key::Ctrl, false);
        assert!(!modifiers.command_held());
        assert!(!modifiers.update(Key::Char('a'), true));
    }
}
