use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::event::AppEvent;
use crate::generator::ExtractSource;
use crate::generator::offline::OfflineSource;
use crate::generator::passage::{Passage, PassageBuilder};
use crate::generator::wikipedia::WikipediaSource;
use crate::session::input::CellState;
use crate::session::result::SessionStats;
use crate::session::typing::{Session, SessionState};
use crate::ui::theme::Theme;

pub const WORD_COUNT_STEP: usize = 5;
pub const MAX_WORD_COUNT: usize = 500;

pub type BoxedSource = Box<dyn ExtractSource + Send>;
pub type SourceFactory = Arc<dyn Fn(&Config) -> Result<BoxedSource, FetchError> + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Loading,
    NoPassage,
}

/// Everything the renderer needs for one frame.
pub struct Presentation<'a> {
    pub passage: &'a [char],
    pub cells: &'a [CellState],
    pub stats: SessionStats,
    pub input_enabled: bool,
    pub stats_visible: bool,
    pub progress: f64,
    pub notice: Option<Notice>,
}

impl Presentation<'_> {
    pub fn elapsed_secs(&self) -> u64 {
        self.stats.elapsed_secs
    }

    pub fn wpm(&self) -> u32 {
        self.stats.wpm
    }
}

pub struct App {
    pub config: Config,
    pub theme: &'static Theme,
    pub session: Option<Session>,
    pub typed: String,
    pub generation: u64,
    pub loading: bool,
    build_cancel: Arc<AtomicBool>,
    pub should_quit: bool,
    events: Sender<AppEvent>,
    source_factory: SourceFactory,
}

impl App {
    pub fn new(config: Config, theme: &'static Theme, events: Sender<AppEvent>) -> Self {
        Self::with_source(config, theme, events, Arc::new(wikipedia_source))
    }

    pub fn with_source(
        config: Config,
        theme: &'static Theme,
        events: Sender<AppEvent>,
        source_factory: SourceFactory,
    ) -> Self {
        Self {
            config,
            theme,
            session: None,
            typed: String::new(),
            generation: 0,
            loading: false,
            build_cancel: Arc::new(AtomicBool::new(false)),
            should_quit: false,
            events,
            source_factory,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.loading {
            return SessionState::Loading;
        }
        self.session
            .as_ref()
            .map(Session::state)
            .unwrap_or(SessionState::Idle)
    }

    /// Drops the current session (and its timer) and starts building a new
    /// passage in the background. Earlier builds still in flight stop before
    /// their next fetch, and whatever they send is ignored.
    pub fn restart(&mut self) {
        self.session = None;
        self.typed.clear();
        self.generation += 1;
        self.loading = true;

        self.build_cancel.store(true, Ordering::Relaxed);
        self.build_cancel = Arc::new(AtomicBool::new(false));
        let cancel = Arc::clone(&self.build_cancel);

        let generation = self.generation;
        let config = self.config.clone();
        let factory = Arc::clone(&self.source_factory);
        let tx = self.events.clone();
        info!(
            generation,
            words = config.word_count,
            attempts = config.max_attempts,
            "building passage"
        );

        thread::spawn(move || {
            let passage = match factory(&config) {
                Ok(source) => PassageBuilder::new(source)
                    .cancel_on(cancel)
                    .build(config.word_count, config.max_attempts),
                Err(err) => {
                    warn!(error = %err, "could not create extract source");
                    Passage::empty()
                }
            };
            let _ = tx.send(AppEvent::PassageReady {
                generation,
                passage,
            });
        });
    }

    /// Installs a finished build. Returns false for a stale build.
    pub fn on_passage_ready(&mut self, generation: u64, passage: Passage) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale passage");
            return false;
        }
        self.loading = false;
        self.typed.clear();
        self.session = Some(Session::start(passage));
        true
    }

    pub fn accepts_input(&self) -> bool {
        !self.loading && self.session.as_ref().is_some_and(Session::accepts_input)
    }

    pub fn type_char(&mut self, ch: char) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.accepts_input() || self.typed.chars().count() >= session.passage().len() {
            return;
        }
        self.typed.push(ch);
        session.on_input(&self.typed);
    }

    pub fn backspace(&mut self) {
        if self.typed.pop().is_some() {
            self.sync_input();
        }
    }

    /// Deletes back to the previous word boundary.
    pub fn delete_word(&mut self) {
        if self.typed.is_empty() {
            return;
        }
        let trimmed = self.typed.trim_end_matches(' ');
        let cut = trimmed.rfind(' ').map(|idx| idx + 1).unwrap_or(0);
        self.typed.truncate(cut);
        self.sync_input();
    }

    fn sync_input(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.on_input(&self.typed);
        }
    }

    pub fn tick(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.on_tick();
        }
    }

    pub fn increase_word_count(&mut self) {
        self.config.word_count = (self.config.word_count + WORD_COUNT_STEP).min(MAX_WORD_COUNT);
    }

    pub fn decrease_word_count(&mut self) {
        self.config.word_count = self
            .config
            .word_count
            .saturating_sub(WORD_COUNT_STEP)
            .max(WORD_COUNT_STEP);
    }

    pub fn presentation(&self) -> Presentation<'_> {
        let notice = if self.loading {
            Some(Notice::Loading)
        } else if self.session.as_ref().is_some_and(|s| s.passage().is_empty()) {
            Some(Notice::NoPassage)
        } else {
            None
        };

        match self.session.as_ref().filter(|_| !self.loading) {
            Some(session) => Presentation {
                passage: session.passage().chars(),
                cells: session.cells(),
                stats: session.stats(),
                input_enabled: session.accepts_input(),
                stats_visible: session.is_finished(),
                progress: session.progress(),
                notice,
            },
            None => Presentation {
                passage: &[],
                cells: &[],
                stats: SessionStats::default(),
                input_enabled: false,
                stats_visible: false,
                progress: 0.0,
                notice,
            },
        }
    }
}

fn wikipedia_source(config: &Config) -> Result<BoxedSource, FetchError> {
    let source = WikipediaSource::new(
        &config.api_url,
        config.extract_chars,
        config.fetch_timeout(),
    )?;
    Ok(Box::new(source))
}

/// Builds passages from local paragraphs. Each build starts one paragraph
/// further along so restarts do not repeat the same text.
pub fn offline_source_factory(paragraphs: Arc<[String]>) -> SourceFactory {
    let next_start = Arc::new(AtomicUsize::new(0));
    Arc::new(move |_: &Config| -> Result<BoxedSource, FetchError> {
        let start = next_start.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(OfflineSource::new(Arc::clone(&paragraphs), start)))
    })
}
