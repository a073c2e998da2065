use crate::config::{Config, EntryScreen};
use crate::deck::Deck;
use crate::score::{HighScores, JsonScoreStore};

/// Maximum length of a player name, in characters.
pub const MAX_NAME_LEN: usize = 15;

const CURSOR_BLINK_TICKS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Username,
    Start,
    Game,
    HighScores,
    GameOver,
}

/// Abstract input fed to the session. The terminal layer maps raw key and
/// mouse events into these; anything it cannot map never reaches us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    Click { x: u16, y: u16 },
    Char(char),
    Backspace,
    Enter,
    Escape,
    SelectOption(usize),
    ShowHighScores,
}

/// Screen-space rectangle used to resolve pointer clicks. Kept free of
/// renderer types so the session stays headless-testable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Clickable regions registered by the renderer each frame.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    /// Start / play-again control.
    pub confirm: Option<Region>,
    /// One region per answer option, in display order.
    pub options: Vec<Region>,
}

impl HitMap {
    fn resolve(&self, x: u16, y: u16) -> Option<SessionInput> {
        if let Some(region) = self.confirm {
            if region.contains(x, y) {
                return Some(SessionInput::Enter);
            }
        }
        self.options
            .iter()
            .position(|region| region.contains(x, y))
            .map(SessionInput::SelectOption)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub correct: bool,
    pub remaining_ticks: u32,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub entry: EntryScreen,
    pub rounds: Option<u32>,
    pub feedback_ticks: u32,
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            entry: cfg.entry,
            rounds: cfg.rounds,
            feedback_ticks: cfg.feedback_ticks,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        (&Config::default()).into()
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct View {
    pub screen: Screen,
    pub player_name: String,
    pub cursor_visible: bool,
    pub prompt: Option<String>,
    pub score: u32,
    pub options: Vec<String>,
    pub feedback: Option<(String, bool)>,
    pub round: u32,
    pub rounds: Option<u32>,
    pub best: Option<u32>,
    pub top_scores: Vec<(String, u32)>,
}

/// One player's run: owns the deck, the score store handle and the screen
/// state machine, and reacts to abstract inputs plus frame ticks.
#[derive(Debug)]
pub struct Session {
    deck: Deck,
    store: JsonScoreStore,
    scores: HighScores,
    config: SessionConfig,
    screen: Screen,
    name: String,
    feedback: Option<Feedback>,
    options: Vec<String>,
    rounds_played: u32,
    ticks: u64,
    hit_map: HitMap,
    high_scores_origin: Screen,
}

impl Session {
    pub fn new(deck: Deck, store: JsonScoreStore, config: SessionConfig) -> Self {
        let scores = store.load();
        let mut session = Self {
            deck,
            store,
            scores,
            screen: Screen::Username,
            name: String::new(),
            feedback: None,
            options: Vec::new(),
            rounds_played: 0,
            ticks: 0,
            hit_map: HitMap::default(),
            high_scores_origin: Screen::Start,
            config,
        };

        match session.config.entry {
            EntryScreen::Username => {}
            EntryScreen::Start => {
                session.name = "player".to_string();
                session.screen = Screen::Start;
            }
            EntryScreen::Game => {
                session.name = "player".to_string();
                session.start_game();
            }
        }

        session
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn player_name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Renderer hands back the clickable regions it drew this frame.
    pub fn set_hit_map(&mut self, hit_map: HitMap) {
        self.hit_map = hit_map;
    }

    pub fn handle(&mut self, input: SessionInput) {
        if let SessionInput::Click { x, y } = input {
            if let Some(resolved) = self.hit_map.resolve(x, y) {
                self.handle(resolved);
            }
            return;
        }

        match self.screen {
            Screen::Username => self.handle_username(input),
            Screen::Start => match input {
                SessionInput::Enter => self.start_game(),
                SessionInput::ShowHighScores => self.open_high_scores(),
                _ => {}
            },
            Screen::Game => {
                if let SessionInput::SelectOption(index) = input {
                    self.answer(index);
                }
            }
            Screen::HighScores => {
                if input == SessionInput::Escape {
                    self.screen = self.high_scores_origin;
                }
            }
            Screen::GameOver => match input {
                SessionInput::Enter => {
                    self.deck.reset();
                    self.rounds_played = 0;
                    self.feedback = None;
                    self.options.clear();
                    self.screen = Screen::Start;
                }
                SessionInput::ShowHighScores => self.open_high_scores(),
                _ => {}
            },
        }
    }

    /// Called once per render frame. Drives the feedback countdown and the
    /// username cursor blink; no wall-clock timing anywhere.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);

        if let Some(feedback) = &mut self.feedback {
            feedback.remaining_ticks = feedback.remaining_ticks.saturating_sub(1);
            if feedback.remaining_ticks == 0 {
                self.feedback = None;
            }
        }
    }

    pub fn view(&self) -> View {
        let limit = self.config.rounds;
        let round = match limit {
            Some(limit) => (self.rounds_played + 1).min(limit),
            None => self.rounds_played + 1,
        };

        View {
            screen: self.screen,
            player_name: self.name.clone(),
            cursor_visible: (self.ticks / CURSOR_BLINK_TICKS) % 2 == 0,
            prompt: self.deck.current_card().map(|c| c.english().to_string()),
            score: self.deck.score(),
            options: self.options.clone(),
            feedback: self
                .feedback
                .as_ref()
                .map(|f| (f.text.clone(), f.correct)),
            round,
            rounds: limit,
            best: self.scores.best(&self.name),
            top_scores: self.scores.top(10),
        }
    }

    fn handle_username(&mut self, input: SessionInput) {
        match input {
            SessionInput::Char(c) => {
                if !c.is_control() && self.name.chars().count() < MAX_NAME_LEN {
                    self.name.push(c);
                }
            }
            SessionInput::Backspace => {
                self.name.pop();
            }
            SessionInput::Enter => {
                let trimmed = self.name.trim();
                if !trimmed.is_empty() {
                    self.name = trimmed.to_string();
                    self.screen = Screen::Start;
                }
            }
            _ => {}
        }
    }

    fn start_game(&mut self) {
        if self.options.is_empty() {
            self.options = self.deck.generate_options();
        }
        self.rounds_played = 0;
        self.screen = Screen::Game;
    }

    fn answer(&mut self, index: usize) {
        let Some(selected) = self.options.get(index).cloned() else {
            return;
        };

        let correct = self.deck.submit_answer(&selected);
        self.feedback = Some(Feedback {
            text: if correct { "Correct!" } else { "Wrong!" }.to_string(),
            correct,
            remaining_ticks: self.config.feedback_ticks,
        });
        self.rounds_played += 1;

        if let Some(limit) = self.config.rounds {
            if self.rounds_played >= limit {
                self.finish_game();
                return;
            }
        }

        self.deck.advance();
        self.options = self.deck.generate_options();
    }

    fn finish_game(&mut self) {
        self.screen = Screen::GameOver;
        // A full disk must not end the evening; the in-memory table still
        // reflects the result.
        let _ = self
            .store
            .record(&mut self.scores, &self.name, self.deck.score());
    }

    fn open_high_scores(&mut self) {
        self.high_scores_origin = self.screen;
        self.screen = Screen::HighScores;
    }
}
