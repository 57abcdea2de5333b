use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a question. Data files use either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{n}"),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(n: i64) -> Self {
        QuestionId::Number(n)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Text(s.to_string())
    }
}

/// A multiple-choice question as stored in a question set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, selected_index: usize) -> bool {
        selected_index == self.answer_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.answer_index]
    }

    pub fn option(&self, idx: usize) -> Option<&str> {
        self.options.get(idx).map(String::as_str)
    }
}

/// What the user did with a question. `selected_index` is `None` for skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub selected_index: Option<usize>,
    pub correct: bool,
}

impl AnswerRecord {
    pub fn answered(question: &Question, selected_index: usize) -> Self {
        Self {
            selected_index: Some(selected_index),
            correct: question.is_correct(selected_index),
        }
    }

    pub fn skipped() -> Self {
        Self {
            selected_index: None,
            correct: false,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.selected_index.is_none()
    }
}
