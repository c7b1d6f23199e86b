use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Single-line editable topic field. The cursor is a byte offset that
/// always sits on a character boundary.
#[derive(Debug, Default, Clone)]
pub struct Composer {
    buffer: String,
    cursor: usize,
}

impl Composer {
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Display width of everything left of the cursor, for cursor
    /// placement in wide-character topics.
    pub fn cursor_width(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Applies one key; true when the buffer changed.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = prev_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.buffer.len() {
                    return false;
                }
                let next = next_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                true
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor = prev_boundary(&self.buffer, self.cursor);
                }
                false
            }
            KeyCode::Right => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_boundary(&self.buffer, self.cursor);
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.buffer.len();
                false
            }
            _ => false,
        }
    }
}

fn prev_boundary(text: &str, idx: usize) -> usize {
    let mut i = idx.saturating_sub(1);
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_boundary(text: &str, idx: usize) -> usize {
    let mut i = (idx + 1).min(text.len());
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
