// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod error;
pub mod gamification;
pub mod logging;
pub mod question;
pub mod quiz;
pub mod review;
pub mod runtime;
pub mod store;
pub mod ui;
pub mod util;

pub use error::LoadError;
pub use question::{AnswerRecord, Question, QuestionId};
pub use quiz::{Advance, QuizSession, SelectOutcome, SessionStatus};
