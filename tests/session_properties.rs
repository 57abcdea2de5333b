use assert_matches::assert_matches;
use kwiz::gamification::{Badge, Level};
use kwiz::review::ReviewOutcome;
use kwiz::store::{parse_questions, QuestionStore, JsonFileStore};
use kwiz::{Advance, LoadError, Question, QuestionId, QuizSession, SelectOutcome};

fn quiz(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            id: QuestionId::Text(format!("q{i}")),
            question: format!("Question {i}"),
            options: vec!["right".into(), "wrong".into()],
            answer_index: 0,
            explanation: format!("Explanation {i}"),
        })
        .collect()
}

#[test]
fn answer_correct_correct_then_skip() {
    let mut session = QuizSession::new(quiz(3)).unwrap();

    session.select_current(0);
    assert_eq!(session.advance(), Advance::Moved(1));
    session.select_current(0);
    assert_eq!(session.advance(), Advance::Moved(2));
    assert_eq!(session.skip(), Advance::Completed);

    assert!(session.is_complete());
    assert_eq!(session.score(), 2);
    assert_eq!(session.streak(), 0);
    assert_eq!(session.best_streak(), 2);
    assert_eq!(session.badge(), Badge::Learner);

    let summary = session.summary().unwrap();
    assert_eq!(summary.entries[2].outcome, ReviewOutcome::NotAnswered);
    assert_eq!(summary.entries[2].your_answer_text(), "Not answered");
}

#[test]
fn first_answer_sticks() {
    let mut session = QuizSession::new(quiz(2)).unwrap();
    let id = QuestionId::from("q0");

    assert_matches!(session.select_option(&id, 1), SelectOutcome::Recorded(r) if !r.correct);
    assert_matches!(session.select_option(&id, 0), SelectOutcome::AlreadyAnswered(r) if r.selected_index == Some(1));
    assert_eq!(session.score(), 0);
}

#[test]
fn invariants_hold_over_mixed_run() {
    let mut session = QuizSession::new(quiz(12)).unwrap();
    let plan = [0, 0, 1, 0, 9, 0, 0, 0, 1, 9, 0, 0]; // 9 = skip

    for (i, pick) in plan.into_iter().enumerate() {
        assert_eq!(session.level(), kwiz::gamification::derive_level(i));
        if pick == 9 {
            session.skip();
            assert_eq!(session.streak(), 0);
        } else {
            session.select_current(pick);
            if pick != 0 {
                assert_eq!(session.streak(), 0);
            }
            session.advance();
        }

        let correct = session.answers().values().filter(|r| r.correct).count();
        assert_eq!(session.score(), correct);
        assert!(session.score() <= session.total());
        assert!(session.best_streak() >= session.streak());
    }

    assert!(session.is_complete());
    assert_eq!(session.level(), Level::Platinum);
    assert_eq!(session.best_streak(), 3);
}

#[test]
fn restart_restores_initial_state() {
    let questions = quiz(4);
    let mut session = QuizSession::new(questions.clone()).unwrap();
    for _ in 0..4 {
        session.select_current(0);
        session.advance();
    }
    assert!(session.is_complete());
    assert_eq!(session.badge(), Badge::Perfect);

    session.restart();

    assert!(!session.is_complete());
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.streak(), 0);
    assert_eq!(session.best_streak(), 0);
    assert!(session.answers().is_empty());
    assert_eq!(&session.questions()[..], &questions[..]);
}

#[test]
fn empty_source_never_builds_a_session() {
    let loaded = parse_questions(b"[]");
    assert_matches!(loaded, Err(LoadError::Empty));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    std::fs::write(&path, "[]").unwrap();
    assert_matches!(JsonFileStore::with_path(&path).load(), Err(LoadError::Empty));
}
