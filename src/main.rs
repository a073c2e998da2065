use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use kelime::{
    config::{Config, ConfigStore, EntryScreen, FileConfigStore},
    deck::Deck,
    loader::{self, BuiltinDeck, LoadedDeck},
    runtime::{session_input, CrosstermEventSource, FixedTicker, QuizEvent, Runner},
    score::JsonScoreStore,
    session::{HitMap, Screen, Session, SessionConfig, SessionInput},
    ui::{self, Theme},
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

/// terminal flashcard quiz for Turkish vocabulary
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal flashcard quiz: translate English words into Turkish from four choices, with per-player high scores kept across runs."
)]
pub struct Cli {
    /// path to a flashcard csv file (english,turkish per line)
    #[clap(short, long)]
    deck: Option<PathBuf>,

    /// built-in deck to play when no file is given
    #[clap(short, long, value_enum)]
    builtin: Option<BuiltinDeck>,

    /// number of rounds per game
    #[clap(short, long)]
    rounds: Option<u32>,

    /// play until quit instead of a fixed number of rounds
    #[clap(long)]
    endless: bool,

    /// screen to start on
    #[clap(short, long, value_enum)]
    entry: Option<EntryScreen>,

    /// list the built-in decks and exit
    #[clap(long)]
    list_decks: bool,
}

impl Cli {
    /// Overlay flags onto the persisted configuration for this run.
    fn apply_to(&self, config: &mut Config) {
        if let Some(entry) = self.entry {
            config.entry = entry;
        }
        if self.endless {
            config.rounds = None;
        } else if let Some(rounds) = self.rounds {
            config.rounds = Some(rounds.max(1));
        }
        if let Some(builtin) = self.builtin {
            config.builtin_deck = builtin.name();
        }
    }
}

fn load_deck(cli: &Cli, config: &Config) -> Result<LoadedDeck, kelime::deck::DeckError> {
    match &cli.deck {
        Some(path) => loader::load_file(path),
        None => {
            let builtin =
                BuiltinDeck::from_name(&config.builtin_deck).unwrap_or(BuiltinDeck::Starter);
            loader::load_builtin(builtin)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_decks {
        for deck in BuiltinDeck::all() {
            println!("{}", deck.name());
        }
        return Ok(());
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    cli.apply_to(&mut config);
    let _ = config_store.save(&config);

    // Resolve the deck before touching the terminal so load problems are
    // plain startup errors.
    let loaded = match load_deck(&cli, &config) {
        Ok(loaded) => loaded,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, err.to_string()).exit();
        }
    };

    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }

    let deck = match Deck::from_pairs(loaded.pairs) {
        Ok(deck) => deck,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, err.to_string()).exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = Session::new(deck, JsonScoreStore::new(), SessionConfig::from(&config));
    let result = run_loop(&mut terminal, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
) -> Result<(), Box<dyn Error>> {
    let event_source = CrosstermEventSource::new();
    let ticker = FixedTicker::new(Duration::from_millis(TICK_RATE_MS));
    let runner = Runner::new(event_source, ticker);
    let theme = Theme::default();

    loop {
        let view = session.view();
        let mut hit_map = HitMap::default();
        terminal.draw(|f| {
            hit_map = ui::draw(f, &view, &theme);
        })?;
        session.set_hit_map(hit_map);

        match runner.step() {
            QuizEvent::Tick => session.tick(),
            QuizEvent::Resize => {}
            QuizEvent::Click { x, y } => session.handle(SessionInput::Click { x, y }),
            QuizEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }

                // Escape backs out of the high-score view; anywhere else
                // it is the quit signal.
                if key.code == KeyCode::Esc && session.screen() != Screen::HighScores {
                    break;
                }

                if let Some(input) = session_input(key, session.screen()) {
                    session.handle(input);
                }
            }
        }
    }

    Ok(())
}
