use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::input::KeyCode;
use crate::input::KeyEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditAction {
    None,
    Changed,
    Submitted(String),
}

/// Single-line text buffer with a cursor and a horizontal scroll offset.
///
/// The cursor is a char index; the scroll offset is in display columns.
#[derive(Clone, Debug, Default)]
pub struct LineEdit {
    text: String,
    cursor: usize,
    scroll_x: usize,
    view_w: usize,
}

impl LineEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and moves the cursor to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into().replace(['\r', '\n'], " ");
        self.cursor = self.text.chars().count();
        self.ensure_cursor_visible();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_x(&self) -> usize {
        self.scroll_x
    }

    pub fn set_view_width(&mut self, width: usize) {
        self.view_w = width;
        self.ensure_cursor_visible();
    }

    /// Display column of the cursor, relative to the scrolled view.
    pub fn cursor_view_x(&self) -> usize {
        self.cursor_display_x().saturating_sub(self.scroll_x)
    }

    pub fn input(&mut self, key: &KeyEvent) -> EditAction {
        let action = match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.ctrl || key.modifiers.alt {
                    return EditAction::None;
                }
                self.insert_char(c);
                EditAction::Changed
            }
            KeyCode::Enter => EditAction::Submitted(self.text.clone()),
            KeyCode::Backspace => {
                if self.backspace() {
                    EditAction::Changed
                } else {
                    EditAction::None
                }
            }
            KeyCode::Delete => {
                if self.delete() {
                    EditAction::Changed
                } else {
                    EditAction::None
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                EditAction::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                EditAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                EditAction::None
            }
            _ => return EditAction::None,
        };
        self.ensure_cursor_visible();
        action
    }

    /// Whether `key` is something [`LineEdit::input`] reacts to.
    pub fn accepts(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(_) => key.character().is_some(),
            KeyCode::Enter
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => true,
            _ => false,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn cursor_display_x(&self) -> usize {
        self.text
            .chars()
            .take(self.cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    fn ensure_cursor_visible(&mut self) {
        if self.view_w == 0 {
            self.scroll_x = 0;
            return;
        }
        let cx = self.cursor_display_x();
        // One spare column so the cursor can sit after the last character.
        if cx < self.scroll_x {
            self.scroll_x = cx;
        } else if cx >= self.scroll_x + self.view_w {
            self.scroll_x = cx + 1 - self.view_w;
        }
        let full = UnicodeWidthStr::width(self.text.as_str()) + 1;
        if full <= self.view_w {
            self.scroll_x = 0;
        }
    }

    fn insert_char(&mut self, ch: char) {
        let byte_idx = byte_index_from_char_index(&self.text, self.cursor);
        self.text.insert(byte_idx, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = byte_index_from_char_index(&self.text, self.cursor - 1);
        let end = byte_index_from_char_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let start = byte_index_from_char_index(&self.text, self.cursor);
        let end = byte_index_from_char_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn inserts_and_moves_cursor() {
        let mut e = LineEdit::new();
        assert_eq!(e.input(&key(KeyCode::Char('a'))), EditAction::Changed);
        assert_eq!(e.text(), "a");
        assert_eq!(e.cursor(), 1);
        e.input(&key(KeyCode::Left));
        assert_eq!(e.cursor(), 0);
        e.input(&key(KeyCode::Char('b')));
        assert_eq!(e.text(), "ba");
    }

    #[test]
    fn enter_submits_without_clearing() {
        let mut e = LineEdit::new();
        e.set_text("x");
        assert_eq!(
            e.input(&key(KeyCode::Enter)),
            EditAction::Submitted("x".to_string())
        );
        assert_eq!(e.text(), "x");
    }

    #[test]
    fn backspace_and_delete_respect_edges() {
        let mut e = LineEdit::new();
        e.set_text("abc");
        assert_eq!(e.input(&key(KeyCode::Delete)), EditAction::None);
        assert_eq!(e.input(&key(KeyCode::Backspace)), EditAction::Changed);
        assert_eq!(e.text(), "ab");
        e.input(&key(KeyCode::Home));
        assert_eq!(e.input(&key(KeyCode::Backspace)), EditAction::None);
        assert_eq!(e.input(&key(KeyCode::Delete)), EditAction::Changed);
        assert_eq!(e.text(), "b");
    }

    #[test]
    fn control_chords_are_not_typed() {
        let mut e = LineEdit::new();
        let ctrl_a = key(KeyCode::Char('a')).with_modifiers(KeyModifiers {
            ctrl: true,
            ..KeyModifiers::none()
        });
        assert_eq!(e.input(&ctrl_a), EditAction::None);
        assert!(!LineEdit::accepts(&ctrl_a));
        assert!(e.text().is_empty());
    }

    #[test]
    fn view_scrolls_to_keep_cursor_visible() {
        let mut e = LineEdit::new();
        e.set_view_width(4);
        e.set_text("abcdefgh");
        assert_eq!(e.cursor(), 8);
        assert_eq!(e.scroll_x(), 5);
        assert_eq!(e.cursor_view_x(), 3);
        e.input(&key(KeyCode::Home));
        assert_eq!(e.scroll_x(), 0);
        assert_eq!(e.cursor_view_x(), 0);
    }
}
