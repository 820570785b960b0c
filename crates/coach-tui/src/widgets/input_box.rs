//! Text input widget

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Single-line text input with a unicode-aware cursor and horizontal scroll.
/// The buffer is kept as chars so cursor arithmetic never lands inside a
/// multi-byte sequence.
#[derive(Debug, Default)]
pub struct InputBox {
    chars: Vec<char>,
    /// Cursor position as a char index
    cursor: usize,
    /// Horizontal scroll offset in display columns
    scroll: usize,
    placeholder: String,
    focused: bool,
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Current buffer contents
    pub fn content(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Display width of the text before the cursor
    fn cursor_column(&self) -> usize {
        self.chars[..self.cursor].iter().copied().map(char_width).sum()
    }

    /// Handle an input action; returns true if the action was consumed
    pub fn handle_action(&mut self, action: &Action, width: u16) -> bool {
        let consumed = match action {
            Action::Char(c) => {
                self.insert(*c);
                true
            }
            Action::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            Action::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            Action::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    true
                } else {
                    false
                }
            }
            Action::Right => {
                if self.cursor < self.chars.len() {
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            Action::Home => {
                self.cursor = 0;
                true
            }
            Action::End => {
                self.cursor = self.chars.len();
                true
            }
            Action::ClearLine => {
                self.clear();
                true
            }
            Action::DeleteWord => {
                let mut start = self.cursor;
                while start > 0 && self.chars[start - 1] == ' ' {
                    start -= 1;
                }
                while start > 0 && self.chars[start - 1] != ' ' {
                    start -= 1;
                }
                self.chars.drain(start..self.cursor);
                self.cursor = start;
                true
            }
            Action::Paste(text) => {
                for c in text.chars() {
                    // Fold newlines into single spaces for single-line input
                    if c == '\n' || c == '\r' {
                        if self.cursor > 0 && self.chars.get(self.cursor - 1) != Some(&' ') {
                            self.insert(' ');
                        }
                    } else {
                        self.insert(c);
                    }
                }
                true
            }
            _ => false,
        };

        if consumed {
            self.update_scroll(width as usize);
        }
        consumed
    }

    fn update_scroll(&mut self, width: usize) {
        let visible = width.saturating_sub(4).max(1);
        let column = self.cursor_column();

        if column < self.scroll {
            self.scroll = column;
        } else if column >= self.scroll + visible {
            self.scroll = column - visible + 1;
        }
    }

    /// Render the input box
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focused {
                theme.accent_style()
            } else {
                theme.border_style()
            });

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (text, style) = if self.chars.is_empty() {
            (self.placeholder.clone(), theme.dim_style())
        } else {
            (self.visible_window(inner.width as usize), theme.base_style())
        };

        Paragraph::new(text).style(style).render(inner, buf);

        if self.focused {
            let cursor_x = self.cursor_column().saturating_sub(self.scroll);
            if cursor_x < inner.width as usize {
                let pos = (inner.x + cursor_x as u16, inner.y);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_style(Style::default().bg(theme.accent));
                }
            }
        }
    }

    /// The slice of the buffer visible at the current scroll offset
    fn visible_window(&self, width: usize) -> String {
        let mut column = 0;
        let mut out = String::new();
        for &c in &self.chars {
            let w = char_width(c);
            if column + w <= self.scroll {
                column += w;
                continue;
            }
            if column + w > self.scroll + width {
                break;
            }
            out.push(c);
            column += w;
        }
        out
    }
}
