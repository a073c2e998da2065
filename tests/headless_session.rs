use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use kelime::config::EntryScreen;
use kelime::deck::Deck;
use kelime::runtime::{session_input, FixedTicker, QuizEvent, Runner, TestEventSource};
use kelime::score::JsonScoreStore;
use kelime::session::{Screen, Session, SessionConfig};

fn sample_deck() -> Deck {
    Deck::from_pairs(vec![
        ("cat".into(), "kedi".into()),
        ("dog".into(), "köpek".into()),
        ("sun".into(), "güneş".into()),
        ("moon".into(), "ay".into()),
    ])
    .unwrap()
}

fn key(code: KeyCode) -> QuizEvent {
    QuizEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

// Headless integration without a TTY: a full game driven through the
// Runner/TestEventSource pair, choosing the correct answer each round by
// inspecting the deck, exactly as a keyboard player would read the screen.
#[test]
fn headless_full_game_flow() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("scores.json");

    let mut session = Session::new(
        sample_deck(),
        JsonScoreStore::with_path(&store_path),
        SessionConfig {
            entry: EntryScreen::Username,
            rounds: Some(3),
            feedback_ticks: 2,
        },
    );

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    // Producer: type the name and confirm through the start screen.
    for c in "bob".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();

    // Only one answer may be in flight, otherwise a second tick would
    // queue a stale option index for a card that has already moved on.
    let mut answer_pending = false;

    for _ in 0..500u32 {
        match runner.step() {
            QuizEvent::Tick => {
                session.tick();
                // Whenever a round is on screen, answer it correctly.
                if session.screen() == Screen::Game && !answer_pending {
                    let correct = session.deck().current_card().unwrap().turkish().to_string();
                    let index = session
                        .options()
                        .iter()
                        .position(|o| *o == correct)
                        .unwrap();
                    let digit = char::from(b'1' + index as u8);
                    tx.send(key(KeyCode::Char(digit))).unwrap();
                    answer_pending = true;
                }
            }
            QuizEvent::Key(event) => {
                if let Some(input) = session_input(event, session.screen()) {
                    session.handle(input);
                }
                answer_pending = false;
            }
            _ => {}
        }

        if session.screen() == Screen::GameOver {
            break;
        }
    }

    assert_eq!(session.screen(), Screen::GameOver);
    assert_eq!(session.player_name(), "bob");
    assert_eq!(session.deck().score(), 3);

    // The finished game is already on disk.
    let stored = JsonScoreStore::with_path(&store_path).load();
    assert_eq!(stored.best("bob"), Some(3));
}

#[test]
fn headless_feedback_clears_after_configured_ticks() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = Session::new(
        sample_deck(),
        JsonScoreStore::with_path(dir.path().join("scores.json")),
        SessionConfig {
            entry: EntryScreen::Game,
            rounds: Some(10),
            feedback_ticks: 4,
        },
    );

    let correct = session.deck().current_card().unwrap().turkish().to_string();
    let index = session
        .options()
        .iter()
        .position(|o| *o == correct)
        .unwrap();
    let digit = char::from(b'1' + index as u8);

    if let QuizEvent::Key(event) = key(KeyCode::Char(digit)) {
        let input = session_input(event, session.screen()).unwrap();
        session.handle(input);
    }
    assert!(session.feedback().is_some());
    assert!(session.view().feedback.is_some());

    let (_tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(1));
    let runner = Runner::new(es, ticker);

    // No events pending, so every step is a tick.
    for _ in 0..4 {
        if let QuizEvent::Tick = runner.step() {
            session.tick();
        }
    }

    assert!(session.feedback().is_none());
    assert!(session.view().feedback.is_none());
}

#[test]
fn headless_escape_only_leaves_high_scores() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = Session::new(
        sample_deck(),
        JsonScoreStore::with_path(dir.path().join("scores.json")),
        SessionConfig {
            entry: EntryScreen::Start,
            rounds: Some(3),
            feedback_ticks: 2,
        },
    );

    let open = session_input(
        KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE),
        session.screen(),
    )
    .unwrap();
    session.handle(open);
    assert_eq!(session.screen(), Screen::HighScores);

    let escape = session_input(
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
        session.screen(),
    )
    .unwrap();
    session.handle(escape);
    assert_eq!(session.screen(), Screen::Start);
}
