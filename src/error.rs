use std::path::PathBuf;

use thiserror::Error;

use crate::question::QuestionId;

/// Failure to produce a usable question sequence. No session is started when this is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("question set `{0}` not found")]
    NotFound(String),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("question data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no questions found")]
    Empty,

    #[error("question {id} is invalid: {reason}")]
    Invalid { id: QuestionId, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}
