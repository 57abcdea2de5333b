use include_dir::{include_dir, Dir};
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::LoadError;
use crate::question::Question;

static QUIZ_DIR: Dir = include_dir!("src/quizzes");

pub const DEFAULT_QUIZ: &str = "general";

/// Source of the ordered question list for a session
pub trait QuestionStore {
    fn load(&self) -> Result<Vec<Question>, LoadError>;
}

/// Question sets compiled into the binary
#[derive(Debug, Clone)]
pub struct BundledStore {
    name: String,
}

impl BundledStore {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    /// Names of all bundled question sets, sorted
    pub fn available() -> Vec<String> {
        QUIZ_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .filter_map(|f| f.path().file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .sorted()
            .collect()
    }
}

impl QuestionStore for BundledStore {
    fn load(&self) -> Result<Vec<Question>, LoadError> {
        let file = QUIZ_DIR
            .get_file(format!("{}.json", self.name))
            .ok_or_else(|| LoadError::NotFound(self.name.clone()))?;

        let questions = parse_questions(file.contents())?;
        info!(quiz = %self.name, count = questions.len(), "loaded bundled questions");
        Ok(questions)
    }
}

/// A JSON question file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Question>, LoadError> {
        let bytes = fs::read(&self.path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(self.path.display().to_string()),
            _ => LoadError::Io {
                path: self.path.clone(),
                source,
            },
        })?;

        let questions = parse_questions(&bytes)?;
        info!(path = %self.path.display(), count = questions.len(), "loaded questions from file");
        Ok(questions)
    }
}

/// Where a session's questions come from
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionSource {
    Bundled(String),
    File(PathBuf),
}

impl QuestionSource {
    pub fn label(&self) -> String {
        match self {
            QuestionSource::Bundled(name) => name.clone(),
            QuestionSource::File(path) => path.display().to_string(),
        }
    }

    pub fn load(&self) -> Result<Vec<Question>, LoadError> {
        match self {
            QuestionSource::Bundled(name) => BundledStore::new(name.as_str()).load(),
            QuestionSource::File(path) => JsonFileStore::with_path(path).load(),
        }
    }
}

/// Parse and check a JSON array of questions
pub fn parse_questions(bytes: &[u8]) -> Result<Vec<Question>, LoadError> {
    let questions: Vec<Question> = serde_json::from_slice(bytes)?;
    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    validate(&questions)?;
    Ok(questions)
}

pub(crate) fn validate(questions: &[Question]) -> Result<(), LoadError> {
    for q in questions {
        if q.options.len() < 2 {
            return Err(LoadError::Invalid {
                id: q.id.clone(),
                reason: format!("needs at least 2 options, has {}", q.options.len()),
            });
        }
        if q.answer_index >= q.options.len() {
            return Err(LoadError::Invalid {
                id: q.id.clone(),
                reason: format!("answerIndex {} is out of range", q.answer_index),
            });
        }
    }

    if let Some(dup) = questions.iter().map(|q| &q.id).duplicates().next() {
        return Err(LoadError::Invalid {
            id: dup.clone(),
            reason: "duplicate id".to_string(),
        });
    }

    Ok(())
}
