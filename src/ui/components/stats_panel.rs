use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::result::SessionStats;
use crate::ui::theme::Theme;

/// Final numbers of a finished session.
pub struct StatsPanel<'a> {
    stats: SessionStats,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(stats: SessionStats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("stats.title")))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let accuracy = self.stats.accuracy();
        let acc_color = if accuracy >= 95.0 {
            colors.success()
        } else if accuracy >= 85.0 {
            colors.warning()
        } else {
            colors.error()
        };
        let error_color = if self.stats.errors == 0 {
            colors.success()
        } else {
            colors.error()
        };

        let entries = [
            (
                t!("stats.wpm"),
                self.stats.wpm.to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            (
                t!("stats.time"),
                t!("stats.seconds", secs = self.stats.elapsed_secs).into_owned(),
                Style::default().fg(colors.fg()),
            ),
            (
                t!("stats.correct"),
                self.stats.correct.to_string(),
                Style::default().fg(colors.success()),
            ),
            (
                t!("stats.errors"),
                self.stats.errors.to_string(),
                Style::default().fg(error_color),
            ),
            (
                t!("stats.accuracy"),
                format!("{accuracy:.1}%"),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
        ];

        for (row, (label, value, value_style)) in rows.iter().zip(entries) {
            let line = Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(colors.fg())),
                Span::styled(value, value_style),
            ]);
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(*row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_final_numbers() {
        let theme = Theme::default();
        let stats = SessionStats {
            elapsed_secs: 75,
            correct: 190,
            errors: 10,
            wpm: 31,
        };
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        StatsPanel::new(stats, &theme).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("31"));
        assert!(text.contains("190"));
        assert!(text.contains("95.0%"));
    }
}
