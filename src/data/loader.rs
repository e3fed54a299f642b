use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Question;

pub const DEFAULT_QUESTIONS_PATH: &str = "questions.json";

/// Errors raised while reading or writing a question bank file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize question bank: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{} must contain at least one question", .path.display())]
    Empty { path: PathBuf },

    #[error("{} contains question id {id} more than once", .path.display())]
    DuplicateId { path: PathBuf, id: u64 },
}

pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let questions: Vec<Question> =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut seen = HashSet::with_capacity(questions.len());
    if let Some(question) = questions.iter().find(|q| !seen.insert(q.id)) {
        return Err(LoadError::DuplicateId {
            path: path.to_path_buf(),
            id: question.id,
        });
    }

    tracing::debug!(count = questions.len(), path = %path.display(), "loaded question bank");
    Ok(questions)
}

pub fn save_questions_to_json<P: AsRef<Path>>(
    path: P,
    questions: &[Question],
) -> Result<(), LoadError> {
    let path = path.as_ref();

    let mut json_content = serde_json::to_string_pretty(questions).map_err(LoadError::Serialize)?;
    json_content.push('\n');

    fs::write(path, json_content).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(count = questions.len(), path = %path.display(), "saved question bank");
    Ok(())
}

pub fn find_question(questions: &[Question], id: u64) -> Option<&Question> {
    questions.iter().find(|question| question.id == id)
}

/// One past the highest id in the bank, or 1 for an empty bank. `None` once
/// the highest id is `u64::MAX`.
pub fn next_id(questions: &[Question]) -> Option<u64> {
    match questions.iter().map(|question| question.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
