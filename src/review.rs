use crate::gamification::{Badge, Level};
use crate::quiz::QuizSession;

pub const NOT_ANSWERED: &str = "Not answered";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Correct,
    Incorrect,
    /// Skipped, or passed over with Next before answering
    NotAnswered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    /// 1-based position in the quiz
    pub number: usize,
    pub question: String,
    pub your_answer: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub outcome: ReviewOutcome,
}

impl ReviewEntry {
    pub fn your_answer_text(&self) -> &str {
        self.your_answer.as_deref().unwrap_or(NOT_ANSWERED)
    }
}

/// Final results of a completed session
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub level: Level,
    pub badge: Badge,
    pub best_streak: usize,
    pub entries: Vec<ReviewEntry>,
}

impl QuizSummary {
    pub(crate) fn from_session(session: &QuizSession) -> Self {
        let entries = session
            .questions()
            .iter()
            .enumerate()
            .map(|(idx, q)| {
                let record = session.answer_for(&q.id);
                let your_answer = record
                    .and_then(|r| r.selected_index)
                    .and_then(|i| q.option(i))
                    .map(str::to_string);
                let outcome = match (record, &your_answer) {
                    (Some(r), Some(_)) if r.correct => ReviewOutcome::Correct,
                    (Some(_), Some(_)) => ReviewOutcome::Incorrect,
                    _ => ReviewOutcome::NotAnswered,
                };

                ReviewEntry {
                    number: idx + 1,
                    question: q.question.clone(),
                    your_answer,
                    correct_answer: q.correct_option().to_string(),
                    explanation: q.explanation.clone(),
                    outcome,
                }
            })
            .collect();

        Self {
            score: session.score(),
            total: session.total(),
            level: session.level(),
            badge: session.badge(),
            best_streak: session.best_streak(),
            entries,
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.badge == Badge::Perfect
    }

    pub fn count(&self, outcome: ReviewOutcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }
}
