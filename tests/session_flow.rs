use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use raqim::app::{App, BoxedSource, Notice, SourceFactory};
use raqim::config::Config;
use raqim::error::FetchError;
use raqim::event::AppEvent;
use raqim::generator::ExtractSource;
use raqim::generator::passage::Passage;
use raqim::session::input::CellState;
use raqim::session::typing::{Session, SessionState};
use raqim::ui::theme::Theme;

struct FixedSource(&'static str);

impl ExtractSource for FixedSource {
    fn fetch_extract(&mut self) -> Result<String, FetchError> {
        Ok(self.0.to_string())
    }
}

fn app_with(extract: &'static str, words: usize) -> (App, mpsc::Receiver<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
    let factory: SourceFactory = Arc::new(move |_: &Config| -> Result<BoxedSource, FetchError> {
        Ok(Box::new(FixedSource(extract)))
    });
    let config = Config {
        word_count: words,
        max_attempts: 3,
        ..Config::default()
    };
    (App::with_source(config, theme, tx, factory), rx)
}

fn wait_for_passage(app: &mut App, rx: &mpsc::Receiver<AppEvent>) {
    loop {
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::PassageReady {
                generation,
                passage,
            } => {
                if app.on_passage_ready(generation, passage) {
                    return;
                }
            }
            _ => continue,
        }
    }
}

#[test]
fn restart_build_type_and_finish() {
    let (mut app, rx) = app_with("بحر واسع (ازرق) جدا", 3);
    app.restart();
    wait_for_passage(&mut app, &rx);

    assert_eq!(app.state(), SessionState::Ready);
    let passage: String = app.presentation().passage.iter().collect();
    assert_eq!(passage, "بحر واسع جدا");

    for ch in "بحر".chars() {
        app.type_char(ch);
    }
    assert_eq!(app.state(), SessionState::Running);
    app.type_char('x');
    app.backspace();
    for ch in " واسع جدا".chars() {
        app.type_char(ch);
    }

    let view = app.presentation();
    assert!(view.stats_visible);
    assert!(!view.input_enabled);
    assert_eq!(view.stats.correct, passage.chars().count());
    assert_eq!(view.stats.errors, 0);
    assert!(view.cells.iter().all(|c| *c == CellState::Correct));
    assert_eq!(view.progress, 1.0);
}

#[test]
fn only_the_latest_restart_is_installed() {
    let (mut app, rx) = app_with("شمس قمر نجم", 3);
    app.restart();
    app.restart();
    assert_eq!(app.generation, 2);

    let mut installed = 0;
    for _ in 0..2 {
        if let AppEvent::PassageReady {
            generation,
            passage,
        } = rx.recv_timeout(Duration::from_secs(5)).unwrap()
        {
            if app.on_passage_ready(generation, passage) {
                installed += 1;
            }
        }
    }
    assert_eq!(installed, 1);
    assert_eq!(app.state(), SessionState::Ready);
}

#[test]
fn insufficient_text_disables_input() {
    let (mut app, rx) = app_with("Latin only", 10);
    app.restart();
    wait_for_passage(&mut app, &rx);

    let view = app.presentation();
    assert_eq!(view.notice, Some(Notice::NoPassage));
    assert!(!view.input_enabled);
    assert!(!view.stats_visible);
    app.type_char('ب');
    assert!(app.typed.is_empty());
}

#[test]
fn restart_mid_run_drops_the_old_session() {
    let (mut app, rx) = app_with("شمس قمر نجم", 3);
    app.restart();
    wait_for_passage(&mut app, &rx);
    app.type_char('ش');
    assert_eq!(app.state(), SessionState::Running);

    app.restart();
    assert_eq!(app.state(), SessionState::Loading);
    assert!(app.session.is_none());
    assert!(app.typed.is_empty());
    wait_for_passage(&mut app, &rx);
    assert_eq!(app.state(), SessionState::Ready);
    assert_eq!(app.presentation().stats.correct, 0);
}

#[test]
fn live_stats_follow_ticks() {
    let t0 = Instant::now();
    let mut session = Session::start(Passage::new("ابجد هوز"));
    session.on_input_at("ابجد ه", t0);
    assert!(session.on_tick_at(t0 + Duration::from_secs(30)));
    let stats = session.stats();
    assert_eq!(stats.elapsed_secs, 30);
    // 6 correct characters over half a minute
    assert_eq!(stats.wpm, 2);
}
