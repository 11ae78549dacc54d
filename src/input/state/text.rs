//! Text edit buffer with a character cursor.

use crate::draw::{Element, ElementId};
use crate::input::toolbox::ToolStyle;
use crate::util::Point;

/// An open text edit.
///
/// `cursor` counts characters, not bytes, so it is always on a char boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    /// Top-left corner of the text
    pub anchor: Point,
    /// Current content
    pub buffer: String,
    /// Insertion point, in characters from the start of `buffer`
    pub cursor: usize,
    /// Id the committed element gets; an existing element keeps its own
    pub id: ElementId,
    /// Style captured when the edit opened
    pub style: ToolStyle,
}

impl TextEdit {
    /// Opens an empty edit for a new text element.
    pub fn new(anchor: Point, style: ToolStyle) -> Self {
        Self {
            anchor,
            buffer: String::new(),
            cursor: 0,
            id: ElementId::new(),
            style,
        }
    }

    /// Opens an edit preloaded with an existing element's content, keeping its id.
    pub fn existing(id: ElementId, anchor: Point, content: &str, style: ToolStyle) -> Self {
        Self {
            anchor,
            buffer: content.to_string(),
            cursor: content.chars().count(),
            id,
            style,
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(chars)
            .map_or(self.buffer.len(), |(offset, _)| offset)
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.insert(offset, c);
        self.cursor += 1;
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.buffer.remove(offset);
        true
    }

    /// Removes the character after the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let offset = self.byte_offset(self.cursor);
        self.buffer.remove(offset);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let end = self.char_len();
        let moved = self.cursor != end;
        self.cursor = end;
        moved
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Element this edit would commit.
    pub fn to_element(&self) -> Element {
        Element::text(
            self.id,
            self.anchor,
            self.buffer.clone(),
            &self.style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BLACK;

    fn edit(content: &str) -> TextEdit {
        TextEdit::existing(
            ElementId::new(),
            Point::default(),
            content,
            ToolStyle {
                stroke: BLACK,
                fill: None,
                size: 24.0,
                font_family: None,
            },
        )
    }

    #[test]
    fn inserts_at_cursor() {
        let mut text = edit("hllo");
        text.move_home();
        text.move_right();
        text.insert('e');
        assert_eq!(text.buffer, "hello");
        assert_eq!(text.cursor, 2);
    }

    #[test]
    fn backspace_and_delete_respect_bounds() {
        let mut text = edit("ab");
        assert!(!text.delete());
        assert!(text.backspace());
        assert_eq!(text.buffer, "a");
        text.move_home();
        assert!(!text.backspace());
        assert!(text.delete());
        assert!(text.buffer.is_empty());
        assert!(text.is_blank());
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut text = edit("héllo");
        text.move_home();
        text.move_right();
        text.move_right();
        assert!(text.backspace());
        assert_eq!(text.buffer, "hllo");
        text.move_end();
        text.insert('é');
        assert_eq!(text.buffer, "hlloé");
        assert!(!text.move_right());
    }

    #[test]
    fn existing_edit_keeps_id() {
        let text = edit("note");
        let element = text.to_element();
        assert_eq!(element.id, text.id);
        assert_eq!(element.text_content(), Some("note"));
    }

    #[test]
    fn new_edit_id_is_stable() {
        let mut text = TextEdit::new(Point::new(5.0, 5.0), edit("").style);
        let first = text.to_element().id;
        text.insert('a');
        assert_eq!(text.to_element().id, first);
        assert_eq!(text.to_element().id, text.to_element().id);
    }
}
