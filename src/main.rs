use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use raqim::app::{App, offline_source_factory};
use raqim::config::Config;
use raqim::event::{AppEvent, EventHandler};
use raqim::generator::offline::split_paragraphs;
use raqim::logging;
use raqim::ui;
use raqim::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "raqim", version, about = "Arabic typing practice on random encyclopedia text")]
struct Cli {
    #[arg(short, long, help = "Number of words per passage")]
    words: Option<usize>,

    #[arg(short, long, help = "Fetch attempts per passage")]
    attempts: Option<usize>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "MediaWiki API endpoint")]
    api_url: Option<String>,

    #[arg(short, long, help = "Interface language (ar, en)")]
    locale: Option<String>,

    #[arg(long, value_name = "FILE", help = "Practice on paragraphs from a local text file")]
    offline_text: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_init = logging::init();

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "could not read config, using defaults");
        Config::default()
    });
    if let Some(words) = cli.words {
        config.word_count = words;
    }
    if let Some(attempts) = cli.attempts {
        config.max_attempts = attempts;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    config.normalize();
    rust_i18n::set_locale(&config.locale);

    let theme = Theme::load(&config.theme).unwrap_or_default();
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let offline = match cli.offline_text {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(split_paragraphs(&text))
        }
        None => None,
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log = ?log_init.as_ref().ok(),
        words = config.word_count,
        offline = offline.is_some(),
        "starting"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = match offline {
        Some(paragraphs) => App::with_source(
            config,
            theme,
            events.sender(),
            offline_source_factory(paragraphs),
        ),
        None => App::new(config, theme, events.sender()),
    };
    app.restart();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = app.config.save() {
        warn!(error = %err, "could not save config");
    }

    if let Err(err) = &log_init {
        eprintln!("Logging disabled: {err:#}");
    }

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::PassageReady {
                generation,
                passage,
            } => {
                app.on_passage_ready(generation, passage);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat would inflate input
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('r') if ctrl => {
            app.restart();
            return;
        }
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    if app.accepts_input() {
        handle_typing_key(app, key, ctrl);
    } else {
        handle_idle_key(app, key);
    }
}

fn handle_typing_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Backspace if ctrl => app.delete_word(),
        KeyCode::Char('w') | KeyCode::Char('h') if ctrl => app.delete_word(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch) if !ctrl => app.type_char(ch),
        _ => {}
    }
}

fn handle_idle_key(app: &mut App, key: KeyEvent) {
    if app.loading {
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char('r') => app.restart(),
        KeyCode::Up | KeyCode::Char('k') => app.increase_word_count(),
        KeyCode::Down | KeyCode::Char('j') => app.decrease_word_count(),
        _ => {}
    }
}
