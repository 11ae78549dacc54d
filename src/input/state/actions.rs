use crate::config::Action;
use crate::error::BoardError;
use crate::input::command::Command;
use crate::input::events::Key;
use crate::input::toolbox::size_step;
use log::debug;

use super::mouse::settle;
use super::{DrawingState, InputState};

/// Keybinding name for `key`, or `None` for keys that never trigger actions.
fn key_name(key: Key) -> Option<String> {
    let name = match key {
        Key::Char(c) => return Some(c.to_string()),
        Key::Escape => "Escape",
        Key::Return => "Return",
        Key::Backspace => "Backspace",
        Key::Delete => "Delete",
        Key::ArrowLeft => "ArrowLeft",
        Key::ArrowRight => "ArrowRight",
        Key::Home => "Home",
        Key::End => "End",
        Key::Tab => "Tab",
        Key::Space => "Space",
        Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => return None,
    };
    Some(name.to_string())
}

impl InputState {
    /// Processes a key press event.
    ///
    /// Handles all keyboard input including:
    /// - Modifier key tracking
    /// - Text editing (when in TextInput state)
    /// - Configurable actions: cancel, undo/redo, clear, tool selection, size
    pub fn on_key_press(&mut self, key: Key) -> Result<(), BoardError> {
        if self.modifiers.update(key, true) {
            return Ok(());
        }

        if matches!(self.state, DrawingState::TextInput(_)) {
            return settle(self.text_key_press(key));
        }

        if let Some(action) = key_name(key).and_then(|name| self.find_action(&name)) {
            self.handle_action(action);
        }
        Ok(())
    }

    /// Processes a key release event.
    ///
    /// Only modifier releases change state.
    pub fn on_key_release(&mut self, key: Key) {
        self.modifiers.update(key, false);
    }

    /// Key handling while a text edit is open.
    ///
    /// Plain characters always go into the buffer so letters bound to tools can be
    /// typed. Only keys pressed with Ctrl/Alt, or editing keys with a binding, are
    /// looked up as actions. Enter commits, Shift+Enter inserts a newline, Escape
    /// discards the edit.
    fn text_key_press(&mut self, key: Key) -> Result<(), BoardError> {
        let check_actions = match key {
            Key::Char(_) | Key::Space | Key::Return | Key::Escape => self.modifiers.command_held(),
            _ => true,
        };
        if check_actions {
            if let Some(action) = key_name(key).and_then(|name| self.find_action(&name)) {
                self.handle_action(action);
                return Ok(());
            }
        }

        match key {
            Key::Return if !self.modifiers.shift => return self.finish_text_edit(),
            Key::Escape => {
                debug!("Text edit discarded");
                self.abort_gesture();
                return Ok(());
            }
            _ => {}
        }

        let DrawingState::TextInput(edit) = &mut self.state else {
            return Ok(());
        };
        let changed = match key {
            // Unbound shortcut; don't type it
            Key::Char(_) if self.modifiers.command_held() => false,
            Key::Char(c) => {
                edit.insert(c);
                true
            }
            Key::Space => {
                edit.insert(' ');
                true
            }
            // Shift+Enter: insert newline
            Key::Return => {
                edit.insert('\n');
                true
            }
            Key::Backspace => edit.backspace(),
            Key::Delete => edit.delete(),
            Key::ArrowLeft => edit.move_left(),
            Key::ArrowRight => edit.move_right(),
            Key::Home => edit.move_home(),
            Key::End => edit.move_end(),
            _ => false,
        };
        if changed {
            self.needs_redraw = true;
        }
        Ok(())
    }

    /// Handle an action triggered by a keybinding.
    pub(super) fn handle_action(&mut self, action: Action) {
        debug!("Action {:?}", action);
        match action {
            Action::Cancel => self.abort_gesture(),
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::ClearBoard => self.clear_board(),
            Action::SelectBrush
            | Action::SelectLine
            | Action::SelectRectangle
            | Action::SelectCircle
            | Action::SelectArrow
            | Action::SelectEraser
            | Action::SelectText => self.set_active_tool(action.selected_tool()),
            Action::IncreaseSize | Action::DecreaseSize => {
                if let Some(tool) = self.active_tool {
                    let step = size_step(tool);
                    let delta = if action == Action::IncreaseSize {
                        step
                    } else {
                        -step
                    };
                    let size = self.toolbox.adjust_size(tool, delta);
                    debug!("{} size now {}", tool, size);
                    self.needs_redraw = true;
                }
            }
        }
    }

    /// Applies one [`Command`].
    ///
    /// Only style errors ([`BoardError::UnsupportedStyle`]) and element construction
    /// errors are returned; gesture races are absorbed by the handlers.
    pub fn apply(&mut self, command: Command) -> Result<(), BoardError> {
        match command {
            Command::SetActiveTool { tool } => self.set_active_tool(tool),
            Command::PointerDown { x, y, buttons } => self.pointer_down(x, y, buttons)?,
            Command::PointerMove { x, y, buttons } => self.pointer_move(x, y, buttons)?,
            Command::PointerUp { x, y, buttons } => self.pointer_up(x, y, buttons)?,
            Command::KeyPress { key } => self.on_key_press(key)?,
            Command::KeyRelease { key } => self.on_key_release(key),
            Command::TypeText { text } => {
                for c in text.chars() {
                    let key = match c {
                        ' ' => Key::Space,
                        '\n' => Key::Return,
                        c => Key::Char(c),
                    };
                    self.on_key_press(key)?;
                }
            }
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::ClearBoard => self.clear_board(),
            Command::SetStroke { tool, color } => self.set_stroke(tool, color)?,
            Command::SetFill { tool, color } => self.set_fill(tool, color)?,
            Command::SetSize { tool, size } => {
                self.set_size(tool, size);
            }
            Command::SetEraserSize { size } => {
                self.set_eraser_size(size);
            }
            Command::SetFontFamily { tool, font_family } => {
                self.set_font_family(tool, &font_family)?
            }
        }
        Ok(())
    }
}
