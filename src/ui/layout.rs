use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Terminals shorter than this drop the progress bar.
const MIN_HEIGHT_FOR_PROGRESS: u16 = 16;

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub progress: Option<Rect>,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let show_progress = area.height >= MIN_HEIGHT_FOR_PROGRESS;

        let mut constraints = vec![Constraint::Length(1), Constraint::Min(5)];
        if show_progress {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(2));

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            progress: show_progress.then(|| vertical[2]),
            footer: vertical[vertical.len() - 1],
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width || !has_hint {
            current = candidate;
            has_hint = true;
        } else {
            out.push(current);
            current = format!("{prefix}{hint}");
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 30;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
