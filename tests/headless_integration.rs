use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kwiz::app::{App, AppState, KeyAction};
use kwiz::gamification::Badge;
use kwiz::runtime::{FixedTicker, QuizEvent, Runner, TestEventSource};
use kwiz::store::{BundledStore, QuestionStore};

fn key(c: char) -> QuizEvent {
    QuizEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

/// Drive the app the way the binary does, without a terminal
fn drive(app: &mut App, events: Vec<QuizEvent>) {
    let (tx, rx) = mpsc::channel();
    let count = events.len();
    for ev in events {
        tx.send(ev).unwrap();
    }

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    let mut handled = 0;
    for _ in 0..200u32 {
        match runner.step() {
            QuizEvent::Tick => app.on_tick(runner.tick_secs()),
            QuizEvent::Resize => {}
            QuizEvent::Key(k) => {
                handled += 1;
                if app.handle_key(k) == KeyAction::Quit {
                    break;
                }
            }
        }
        if handled == count {
            break;
        }
    }
}

#[test]
fn headless_perfect_run_celebrates() {
    let questions = BundledStore::new("rust").load().unwrap();
    let answers: Vec<usize> = questions.iter().map(|q| q.answer_index).collect();
    let mut app = App::from_load(Ok(questions), "rust", true);

    let mut events = Vec::new();
    for idx in answers {
        events.push(key(char::from(b'a' + idx as u8)));
        events.push(QuizEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
    drive(&mut app, events);

    assert_eq!(app.state, AppState::Summary);
    let summary = app.session.as_ref().unwrap().summary().unwrap();
    assert_eq!(summary.badge, Badge::Perfect);
    assert_eq!(summary.best_streak, summary.total);
    assert!(app.celebration.is_active);
}

#[test]
fn headless_skip_everything() {
    let questions = BundledStore::new("general").load().unwrap();
    let total = questions.len();
    let mut app = App::from_load(Ok(questions), "general", true);

    drive(&mut app, (0..total).map(|_| key('s')).collect());

    assert_eq!(app.state, AppState::Summary);
    let session = app.session.as_ref().unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.answers().len(), total);
    assert!(session.answers().values().all(|r| r.selected_index.is_none()));
    assert!(!app.celebration.is_active);
}

#[test]
fn headless_restart_after_summary() {
    let questions = BundledStore::new("rust").load().unwrap();
    let total = questions.len();
    let mut app = App::from_load(Ok(questions), "rust", true);

    let mut events: Vec<QuizEvent> = (0..total).map(|_| key('n')).collect();
    events.push(key('r'));
    drive(&mut app, events);

    assert_eq!(app.state, AppState::Question);
    let session = app.session.as_ref().unwrap();
    assert_eq!(session.current_index(), 0);
    assert!(session.answers().is_empty());
}

#[test]
fn headless_escape_quits_early() {
    let questions = BundledStore::new("general").load().unwrap();
    let mut app = App::from_load(Ok(questions), "general", true);

    drive(
        &mut app,
        vec![
            QuizEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            key('s'),
        ],
    );

    assert_eq!(app.session.as_ref().unwrap().current_index(), 0);
}
