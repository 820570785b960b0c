//! Progress dashboard panel
//!
//! Read-only snapshot of learner progress: a mastery gauge, a "next up"
//! callout, and the module list. The numbers are placeholders supplied by
//! the caller; nothing here computes progress.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

/// One entry in the module list
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleEntry {
    pub name: String,
    pub active: bool,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub skill: String,
    /// Mastery percentage, 0..=100
    pub percent: u16,
    pub next_up: String,
    pub modules: Vec<ModuleEntry>,
}

impl ProgressSnapshot {
    /// The demo placeholder data shown until real progress tracking exists
    pub fn placeholder() -> Self {
        Self {
            skill: "Python Mastery".to_string(),
            percent: 45,
            next_up: "Advanced Pandas Functions".to_string(),
            modules: vec![
                ModuleEntry {
                    name: "Intro to Data Science".to_string(),
                    active: true,
                },
                ModuleEntry {
                    name: "Machine Learning Basics".to_string(),
                    active: false,
                },
            ],
        }
    }
}

/// Bordered panel rendering a [`ProgressSnapshot`]
pub struct ProgressPanel<'a> {
    snapshot: &'a ProgressSnapshot,
    theme: &'a Theme,
}

impl<'a> ProgressPanel<'a> {
    pub fn new(snapshot: &'a ProgressSnapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }

    fn skill_line(&self, width: usize) -> Line<'_> {
        let percent = format!("{}%", self.snapshot.percent.min(100));
        let left_width = self.snapshot.skill.chars().count();
        let right_width = percent.chars().count();

        if left_width + right_width + 1 <= width {
            let spacing = width - left_width - right_width;
            Line::from(vec![
                Span::styled(self.snapshot.skill.as_str(), self.theme.base_style()),
                Span::raw(" ".repeat(spacing)),
                Span::styled(percent, self.theme.accent_bold()),
            ])
        } else {
            Line::from(Span::styled(
                self.snapshot.skill.as_str(),
                self.theme.base_style(),
            ))
        }
    }
}

impl Widget for ProgressPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Your Progress ");

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        lines.push(self.skill_line(inner.width as usize));
        // Row 1 is drawn over by the gauge below.
        lines.push(Line::from(""));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Next Up: ", self.theme.warning_style()),
            Span::styled(self.snapshot.next_up.as_str(), self.theme.base_style()),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Active Modules",
            self.theme.accent_bold(),
        )));
        for module in &self.snapshot.modules {
            let (marker, style) = if module.active {
                ("● ", self.theme.base_style())
            } else {
                ("○ ", self.theme.dim_style())
            };
            lines.push(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(module.name.as_str(), style),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);

        if inner.height > 1 {
            let gauge_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
            let ratio = f64::from(self.snapshot.percent.min(100)) / 100.0;
            Gauge::default()
                .ratio(ratio)
                .gauge_style(self.theme.gauge_style())
                .label("")
                .render(gauge_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_snapshot() {
        let snapshot = ProgressSnapshot::placeholder();
        assert_eq!(snapshot.skill, "Python Mastery");
        assert_eq!(snapshot.percent, 45);
        assert_eq!(snapshot.next_up, "Advanced Pandas Functions");
        assert_eq!(snapshot.modules.len(), 2);
        assert!(snapshot.modules[0].active);
        assert!(!snapshot.modules[1].active);
    }

    #[test]
    fn test_render_into_small_buffer_does_not_panic() {
        let snapshot = ProgressSnapshot::placeholder();
        let theme = Theme::dark();
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        ProgressPanel::new(&snapshot, &theme).render(Rect::new(0, 0, 10, 3), &mut buf);
    }
}
