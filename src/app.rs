use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::celebration::CelebrationAnimation;
use crate::error::LoadError;
use crate::question::{AnswerRecord, Question};
use crate::quiz::{Advance, QuizSession, SelectOutcome};
use crate::util::option_index_for_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Question,
    Summary,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Screen-level controller: turns key presses into session calls
#[derive(Debug)]
pub struct App {
    pub session: Option<QuizSession>,
    pub load_error: Option<String>,
    pub state: AppState,
    /// quiz name or file path, shown in the title
    pub source: String,
    /// highlighted option on the question screen
    pub cursor: usize,
    pub review_scroll: u16,
    pub celebration: CelebrationAnimation,
    pub celebrate: bool,
    pub viewport: (u16, u16),
}

impl App {
    pub fn new(session: QuizSession, source: impl Into<String>, celebrate: bool) -> Self {
        Self {
            session: Some(session),
            load_error: None,
            state: AppState::Question,
            source: source.into(),
            cursor: 0,
            review_scroll: 0,
            celebration: CelebrationAnimation::new(),
            celebrate,
            viewport: (80, 24),
        }
    }

    /// An app that can only show why the questions did not load
    pub fn failed(err: &LoadError, source: impl Into<String>) -> Self {
        Self {
            session: None,
            load_error: Some(err.to_string()),
            state: AppState::LoadFailed,
            source: source.into(),
            cursor: 0,
            review_scroll: 0,
            celebration: CelebrationAnimation::new(),
            celebrate: false,
            viewport: (80, 24),
        }
    }

    pub fn from_load(
        loaded: Result<Vec<Question>, LoadError>,
        source: impl Into<String>,
        celebrate: bool,
    ) -> Self {
        let source = source.into();
        match loaded.and_then(QuizSession::new) {
            Ok(session) => Self::new(session, source, celebrate),
            Err(err) => {
                warn!(%source, %err, "could not load questions");
                Self::failed(&err, source)
            }
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref().and_then(QuizSession::current_question)
    }

    /// Answer already given for the question on screen
    pub fn current_answer(&self) -> Option<AnswerRecord> {
        let session = self.session.as_ref()?;
        let question = session.current_question()?;
        session.answer_for(&question.id).copied()
    }

    pub fn on_tick(&mut self, dt: f64) {
        self.celebration.update(dt);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return KeyAction::Quit;
        }

        match self.state {
            AppState::Question => self.on_question_key(key),
            AppState::Summary => match key.code {
                KeyCode::Char('q') => return KeyAction::Quit,
                KeyCode::Char('r') => self.restart(),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.review_scroll = self.review_scroll.saturating_sub(1)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.review_scroll = self.review_scroll.saturating_add(1)
                }
                KeyCode::PageUp => self.review_scroll = self.review_scroll.saturating_sub(10),
                KeyCode::PageDown => self.review_scroll = self.review_scroll.saturating_add(10),
                KeyCode::Home => self.review_scroll = 0,
                _ => {}
            },
            AppState::LoadFailed => {
                if key.code == KeyCode::Char('q') {
                    return KeyAction::Quit;
                }
            }
        }

        KeyAction::Continue
    }

    fn on_question_key(&mut self, key: KeyEvent) {
        let Some(option_count) = self.current_question().map(|q| q.options.len()) else {
            return;
        };
        let answered = self.current_answer().is_some();

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(option_count.saturating_sub(1))
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if answered {
                    self.next();
                } else {
                    self.select(self.cursor);
                }
            }
            KeyCode::Right | KeyCode::Char('n') => self.next(),
            KeyCode::Char('s') => self.skip(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char(c) => {
                if let Some(idx) = option_index_for_key(c, option_count) {
                    self.cursor = idx;
                    self.select(idx);
                }
            }
            _ => {}
        }
    }

    pub fn select(&mut self, idx: usize) {
        if let Some(session) = self.session.as_mut() {
            if let SelectOutcome::AlreadyAnswered(_) = session.select_current(idx) {
                info!("question already answered");
            }
        }
    }

    pub fn next(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let advance = session.advance();
            self.after_advance(advance);
        }
    }

    pub fn skip(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let advance = session.skip();
            self.after_advance(advance);
        }
    }

    fn after_advance(&mut self, advance: Advance) {
        match advance {
            Advance::Moved(_) => self.cursor = 0,
            Advance::Completed => self.enter_summary(),
            Advance::Ignored => {}
        }
    }

    fn enter_summary(&mut self) {
        self.state = AppState::Summary;
        self.review_scroll = 0;

        let perfect = self
            .session
            .as_ref()
            .and_then(QuizSession::summary)
            .is_some_and(|s| s.is_perfect());
        if perfect && self.celebrate {
            info!("perfect score, starting celebration");
            let (width, height) = self.viewport;
            self.celebration.start(width, height);
        }
    }

    pub fn restart(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.restart();
            self.state = AppState::Question;
            self.cursor = 0;
            self.review_scroll = 0;
            self.celebration.stop();
        }
    }
}
