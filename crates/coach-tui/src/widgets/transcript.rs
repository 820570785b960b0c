//! Transcript widget for displaying the conversation

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in the conversation. Immutable once created; the transcript
/// is append-only and insertion order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Marks the fixed fallback turn shown when the service call failed
    pub is_error: bool,
}

impl Turn {
    /// A turn typed by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            is_error: false,
        }
    }

    /// A reply from the coach
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            is_error: false,
        }
    }

    /// The canned reply shown when the interaction failed
    pub fn fallback(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            is_error: true,
        }
    }
}

/// Scrollable view over a slice of turns
pub struct TranscriptView<'a> {
    turns: &'a [Turn],
    theme: &'a Theme,
    scroll: usize,
}

impl<'a> TranscriptView<'a> {
    pub fn new(turns: &'a [Turn], theme: &'a Theme) -> Self {
        Self {
            turns,
            theme,
            scroll: 0,
        }
    }

    /// Set scroll offset in lines
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn turn_lines(&self, turn: &Turn, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let (header, header_style) = match turn.role {
            Role::User => ("▶ You", self.theme.accent_bold()),
            Role::Assistant if turn.is_error => ("◀ Coach", self.theme.error_style()),
            Role::Assistant => ("◀ Coach", self.theme.coach_bold()),
        };
        lines.push(Line::from(Span::styled(header.to_string(), header_style)));

        let content_style = if turn.is_error {
            self.theme.error_style()
        } else {
            self.theme.base_style()
        };

        let content_width = width.saturating_sub(2).max(1);
        for wrapped in textwrap::wrap(&turn.content, content_width) {
            lines.push(Line::from(Span::styled(
                format!("  {}", wrapped),
                content_style,
            )));
        }

        // Blank separator between turns
        lines.push(Line::from(""));

        lines
    }
}

impl Widget for TranscriptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let mut all_lines: Vec<Line> = Vec::new();
        for turn in self.turns {
            all_lines.extend(self.turn_lines(turn, width));
        }

        let visible: Vec<Line> = all_lines
            .into_iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible).render(area, buf);
    }
}

/// Number of lines the transcript occupies at the given width. Must agree
/// with [`TranscriptView`] rendering; used to clamp the scroll offset and to
/// implement scroll-to-bottom.
pub fn transcript_height(turns: &[Turn], width: usize) -> usize {
    let content_width = width.saturating_sub(2).max(1);
    turns
        .iter()
        .map(|turn| 2 + textwrap::wrap(&turn.content, content_width).len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let user = Turn::user("hi");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_error);

        let fallback = Turn::fallback("sorry");
        assert_eq!(fallback.role, Role::Assistant);
        assert!(fallback.is_error);
    }

    #[test]
    fn test_height_single_short_turn() {
        // Header + one content line + separator.
        let turns = vec![Turn::user("hello")];
        assert_eq!(transcript_height(&turns, 40), 3);
    }

    #[test]
    fn test_height_wraps_long_content() {
        let turns = vec![Turn::assistant("a".repeat(100))];
        // 100 chars at content width 38 wrap to 3 lines.
        assert_eq!(transcript_height(&turns, 40), 2 + 3);
    }

    #[test]
    fn test_height_sums_all_turns() {
        let turns = vec![Turn::user("q"), Turn::assistant("a")];
        assert_eq!(transcript_height(&turns, 40), 6);
    }

    #[test]
    fn test_height_survives_tiny_width() {
        let turns = vec![Turn::user("hello")];
        // Degenerate widths must not panic or return zero content lines.
        assert!(transcript_height(&turns, 0) >= 3);
    }
}
