use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, MouseButton, MouseEventKind,
};

use crate::session::{Screen, SessionInput};

/// Unified event type consumed by the main loop
#[derive(Clone, Debug)]
pub enum QuizEvent {
    Key(KeyEvent),
    Click { x: u16, y: u16 },
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<QuizEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(QuizEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Mouse(mouse)) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        let click = QuizEvent::Click {
                            x: mouse.column,
                            y: mouse.row,
                        };
                        if tx.send(click).is_err() {
                            break;
                        }
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(QuizEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<QuizEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<QuizEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> QuizEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => QuizEvent::Tick,
        }
    }
}

/// Maps a key event to the session input it means on the given screen.
/// Keys with no meaning on the current screen map to `None` and are
/// dropped without touching any state.
pub fn session_input(key: KeyEvent, screen: Screen) -> Option<SessionInput> {
    match key.code {
        KeyCode::Enter => Some(SessionInput::Enter),
        KeyCode::Esc => Some(SessionInput::Escape),
        KeyCode::Backspace => Some(SessionInput::Backspace),
        KeyCode::Char(c) => match screen {
            Screen::Username => Some(SessionInput::Char(c)),
            Screen::Game => match c {
                '1'..='4' => Some(SessionInput::SelectOption(c as usize - '1' as usize)),
                _ => None,
            },
            Screen::Start | Screen::GameOver => match c {
                'h' => Some(SessionInput::ShowHighScores),
                _ => None,
            },
            Screen::HighScores => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            QuizEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(QuizEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            QuizEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_select_options_only_in_game() {
        assert_eq!(
            session_input(key(KeyCode::Char('1')), Screen::Game),
            Some(SessionInput::SelectOption(0))
        );
        assert_eq!(
            session_input(key(KeyCode::Char('4')), Screen::Game),
            Some(SessionInput::SelectOption(3))
        );
        assert_eq!(session_input(key(KeyCode::Char('5')), Screen::Game), None);
        assert_eq!(session_input(key(KeyCode::Char('1')), Screen::Start), None);
    }

    #[test]
    fn chars_edit_name_only_on_username_screen() {
        assert_eq!(
            session_input(key(KeyCode::Char('b')), Screen::Username),
            Some(SessionInput::Char('b'))
        );
        assert_eq!(
            session_input(key(KeyCode::Backspace), Screen::Username),
            Some(SessionInput::Backspace)
        );
        assert_eq!(session_input(key(KeyCode::Char('b')), Screen::Game), None);
    }

    #[test]
    fn high_scores_shortcut_from_start_and_game_over() {
        assert_eq!(
            session_input(key(KeyCode::Char('h')), Screen::Start),
            Some(SessionInput::ShowHighScores)
        );
        assert_eq!(
            session_input(key(KeyCode::Char('h')), Screen::GameOver),
            Some(SessionInput::ShowHighScores)
        );
        assert_eq!(
            session_input(key(KeyCode::Char('h')), Screen::HighScores),
            None
        );
    }
}
