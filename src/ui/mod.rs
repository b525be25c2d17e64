pub mod components;
pub mod layout;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use rust_i18n::t;

use crate::app::{App, Notice, Presentation};
use crate::session::typing::SessionState;
use components::progress_bar::ProgressBar;
use components::stats_panel::StatsPanel;
use components::typing_area::TypingArea;
use layout::{AppLayout, centered_rect, pack_hint_lines};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let view = app.presentation();
    let layout = AppLayout::new(area);

    render_header(frame, app, &view, layout.header);

    match view.notice {
        Some(notice) => render_notice(frame, app, notice, layout.main),
        None => {
            let typing = TypingArea::new(view.passage, view.cells, app.theme);
            frame.render_widget(typing, layout.main);
        }
    }

    if let Some(progress_area) = layout.progress {
        let label = t!("stats.progress");
        let progress = ProgressBar::new(&label, view.progress, app.theme);
        frame.render_widget(progress, progress_area);
    }

    if view.stats_visible {
        let popup = centered_rect(40, 50, layout.main);
        frame.render_widget(Clear, popup);
        frame.render_widget(StatsPanel::new(view.stats, app.theme), popup);
    }

    render_footer(frame, app, &view, layout.footer);
}

fn state_label(state: SessionState) -> String {
    match state {
        SessionState::Idle => t!("header.state_idle"),
        SessionState::Loading => t!("header.state_loading"),
        SessionState::Ready => t!("header.state_ready"),
        SessionState::Running => t!("header.state_running"),
        SessionState::Finished => t!("header.state_finished"),
    }
    .into_owned()
}

fn render_header(frame: &mut Frame, app: &App, view: &Presentation, area: Rect) {
    let colors = &app.theme.colors;
    let base = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

    let info = format!(
        " {} | {} | {}: {} | {}: {} ",
        state_label(app.state()),
        t!("header.words", count = app.config.word_count),
        t!("stats.time"),
        t!("stats.seconds", secs = view.elapsed_secs()),
        t!("stats.wpm"),
        view.wpm(),
    );

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            base.add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} |", t!("app.subtitle")), base),
        Span::styled(info, Style::default().fg(colors.text_pending()).bg(colors.header_bg())),
    ]))
    .style(base);
    frame.render_widget(header, area);
}

fn render_notice(frame: &mut Frame, app: &App, notice: Notice, area: Rect) {
    let colors = &app.theme.colors;
    let (text, color) = match notice {
        Notice::Loading => (t!("notice.loading"), colors.accent()),
        Notice::NoPassage => (t!("notice.no_passage"), colors.error()),
    };

    let block = Block::bordered()
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.bg()));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, view: &Presentation, area: Rect) {
    let colors = &app.theme.colors;
    let hints = match (app.state(), view.notice) {
        (SessionState::Loading, _) => t!("hints.loading"),
        (_, Some(Notice::NoPassage)) => t!("hints.failed"),
        (SessionState::Finished, _) => t!("hints.finished"),
        _ => t!("hints.typing"),
    };
    let parts: Vec<&str> = hints.split("  ").collect();
    let lines: Vec<Line> = pack_hint_lines(&parts, area.width as usize)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
