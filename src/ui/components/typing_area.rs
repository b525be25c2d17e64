use ratatui::buffer::Buffer;
use std::ops::Range;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::input::CellState;
use crate::ui::theme::Theme;

/// Shown in place of a space that is under the cursor or was mistyped, so
/// the cell stays visible.
const SPACE_MARKER: char = '\u{00b7}';

pub struct TypingArea<'a> {
    passage: &'a [char],
    cells: &'a [CellState],
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(passage: &'a [char], cells: &'a [CellState], theme: &'a Theme) -> Self {
        Self {
            passage,
            cells,
            theme,
        }
    }
}

fn display_char(ch: char, state: CellState) -> char {
    match (ch, state) {
        (' ', CellState::Current | CellState::Incorrect) => SPACE_MARKER,
        _ => ch,
    }
}

/// Greedy word wrap of the passage into rows of at most `width` chars. A
/// word keeps its trailing space; words wider than a row are split.
fn wrap_rows(passage: &[char], width: usize) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    if width == 0 {
        return rows;
    }

    let mut row_start = 0;
    let mut idx = 0;
    while idx < passage.len() {
        let word_end = passage[idx..]
            .iter()
            .position(|&ch| ch == ' ')
            .map(|pos| idx + pos + 1)
            .unwrap_or(passage.len());

        if word_end - row_start > width && idx > row_start {
            rows.push(row_start..idx);
            row_start = idx;
        }
        while word_end - row_start > width {
            rows.push(row_start..row_start + width);
            row_start += width;
        }
        idx = word_end;
    }
    if row_start < passage.len() {
        rows.push(row_start..passage.len());
    }
    rows
}

/// First visible row that keeps `cursor_row` near the middle of `height`
/// rows without scrolling past the end.
fn scroll_offset(cursor_row: usize, total_rows: usize, height: usize) -> usize {
    let max_offset = total_rows.saturating_sub(height);
    cursor_row.saturating_sub(height / 2).min(max_offset)
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);

        let style_of = |state: CellState| match state {
            CellState::Correct => Style::default().fg(colors.text_correct()),
            CellState::Incorrect => Style::default()
                .fg(colors.text_incorrect())
                .bg(colors.text_incorrect_bg())
                .add_modifier(Modifier::UNDERLINED),
            CellState::Current => Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg()),
            CellState::Untouched => Style::default().fg(colors.text_pending()),
        };

        let rows = wrap_rows(self.passage, inner.width as usize);
        let lines: Vec<Line> = rows
            .iter()
            .map(|row| {
                let spans: Vec<Span> = self.passage[row.clone()]
                    .iter()
                    .zip(self.cells.get(row.clone()).unwrap_or_default())
                    .map(|(&ch, &state)| {
                        Span::styled(display_char(ch, state).to_string(), style_of(state))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let cursor = self
            .cells
            .iter()
            .position(|&state| state == CellState::Current)
            .unwrap_or(0);
        let cursor_row = rows
            .iter()
            .position(|row| row.contains(&cursor))
            .unwrap_or(0);
        let offset = scroll_offset(cursor_row, rows.len(), inner.height as usize);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Right)
            .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));

        paragraph.render(area, buf);
    }
}
