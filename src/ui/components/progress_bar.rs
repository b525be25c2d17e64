use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

pub struct ProgressBar<'a> {
    pub label: String,
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            ratio: ratio.clamp(0.0, 1.0),
            theme,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Fills from the right, following the reading direction of the passage.
        let filled_width = (self.ratio * inner.width as f64) as u16;
        let fill_start = inner.x + inner.width - filled_width;
        let label = format!("{:.0}%", self.ratio * 100.0);

        for x in inner.x..inner.x + inner.width {
            let style = if x >= fill_start {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_is_clamped() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::new("x", 1.7, &theme).ratio, 1.0);
        assert_eq!(ProgressBar::new("x", -0.2, &theme).ratio, 0.0);
    }

    #[test]
    fn test_fill_starts_from_the_right() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        ProgressBar::new("p", 0.5, &theme).render(area, &mut buf);
        let filled = theme.colors.bar_filled();
        assert_eq!(buf[(10, 1)].bg, filled);
        assert_ne!(buf[(1, 1)].bg, filled);
    }
}
