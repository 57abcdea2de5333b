use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::gamification::{derive_badge, derive_level, Badge, Level};
use crate::question::{AnswerRecord, Question, QuestionId};
use crate::review::QuizSummary;
use crate::store::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Complete,
}

/// Result of an attempt to answer a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Recorded(AnswerRecord),
    /// The question already had a record; the existing one is returned untouched.
    AlreadyAnswered(AnswerRecord),
    /// The session is complete and only accepts `restart`.
    Ignored,
}

/// Result of moving past the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(usize),
    Completed,
    Ignored,
}

/// Read-only view of the counters the stats bar displays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub index: usize,
    pub total: usize,
    pub score: usize,
    pub streak: usize,
    pub best_streak: usize,
    pub level: Level,
    pub badge: Badge,
    pub progress: f64,
}

/// One run through a fixed question sequence
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Arc<[Question]>,
    current_index: usize,
    score: usize,
    answered: HashMap<QuestionId, AnswerRecord>,
    streak: usize,
    best_streak: usize,
    status: SessionStatus,
}

impl QuizSession {
    pub fn new(questions: impl Into<Arc<[Question]>>) -> Result<Self, LoadError> {
        let questions = questions.into();
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }
        validate(&questions)?;

        Ok(Self {
            questions,
            current_index: 0,
            score: 0,
            answered: HashMap::new(),
            streak: 0,
            best_streak: 0,
            status: SessionStatus::Active,
        })
    }

    pub fn questions(&self) -> &Arc<[Question]> {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn streak(&self) -> usize {
        self.streak
    }

    pub fn best_streak(&self) -> usize {
        self.best_streak
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.total()
    }

    /// The question being shown, or `None` once the session is complete
    pub fn current_question(&self) -> Option<&Question> {
        match self.status {
            SessionStatus::Active => self.questions.get(self.current_index),
            SessionStatus::Complete => None,
        }
    }

    pub fn answer_for(&self, id: &QuestionId) -> Option<&AnswerRecord> {
        self.answered.get(id)
    }

    pub fn answers(&self) -> &HashMap<QuestionId, AnswerRecord> {
        &self.answered
    }

    pub fn level(&self) -> Level {
        derive_level(self.current_index)
    }

    pub fn badge(&self) -> Badge {
        derive_badge(self.score, self.total())
    }

    /// Fraction of the quiz behind the user; reaches 1.0 only on completion
    pub fn progress(&self) -> f64 {
        match self.status {
            SessionStatus::Active => self.current_index as f64 / self.total() as f64,
            SessionStatus::Complete => 1.0,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            index: self.current_index,
            total: self.total(),
            score: self.score,
            streak: self.streak,
            best_streak: self.best_streak,
            level: self.level(),
            badge: self.badge(),
            progress: self.progress(),
        }
    }

    /// Record an answer for `id`. The first record for a question wins.
    ///
    /// Panics if `id` is not part of this session or `selected_index` is not
    /// one of the question's options; both mean the caller is broken.
    pub fn select_option(&mut self, id: &QuestionId, selected_index: usize) -> SelectOutcome {
        if self.is_complete() {
            return SelectOutcome::Ignored;
        }

        let question = self
            .questions
            .iter()
            .find(|q| &q.id == id)
            .unwrap_or_else(|| panic!("question {id} is not part of this session"));
        assert!(
            selected_index < question.options.len(),
            "option {selected_index} out of range for question {id} ({} options)",
            question.options.len()
        );

        if let Some(existing) = self.answered.get(id) {
            debug!(question = %id, "ignoring repeated answer");
            return SelectOutcome::AlreadyAnswered(*existing);
        }

        let record = AnswerRecord::answered(question, selected_index);
        self.answered.insert(id.clone(), record);

        if record.correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }

        info!(
            question = %id,
            selected = selected_index,
            correct = record.correct,
            score = self.score,
            streak = self.streak,
            "answer recorded"
        );
        SelectOutcome::Recorded(record)
    }

    /// Answer the question currently shown
    pub fn select_current(&mut self, selected_index: usize) -> SelectOutcome {
        match self.current_question() {
            Some(q) => {
                let id = q.id.clone();
                self.select_option(&id, selected_index)
            }
            None => SelectOutcome::Ignored,
        }
    }

    /// Mark the current question as skipped (unless already answered) and move on
    pub fn skip(&mut self) -> Advance {
        let Some(question) = self.current_question() else {
            return Advance::Ignored;
        };

        let id = question.id.clone();
        self.answered
            .entry(id.clone())
            .or_insert_with(AnswerRecord::skipped);
        self.streak = 0;

        info!(question = %id, "question skipped");
        self.advance()
    }

    pub fn advance(&mut self) -> Advance {
        if self.is_complete() {
            return Advance::Ignored;
        }

        if self.is_last() {
            self.status = SessionStatus::Complete;
            info!(
                score = self.score,
                total = self.total(),
                badge = %self.badge(),
                best_streak = self.best_streak,
                "quiz complete"
            );
            Advance::Completed
        } else {
            self.current_index += 1;
            debug!(index = self.current_index, "moved to next question");
            Advance::Moved(self.current_index)
        }
    }

    /// Start over with the same questions. Valid from any state.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.answered.clear();
        self.status = SessionStatus::Active;
        info!("quiz restarted");
    }

    /// Review of every question, available once the session is complete
    pub fn summary(&self) -> Option<QuizSummary> {
        self.is_complete().then(|| QuizSummary::from_session(self))
    }
}
