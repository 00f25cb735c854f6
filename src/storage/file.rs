//! JSON file answer store.

use super::AnswerStore;
use crate::error::{AssessError, Result, StorageErrorKind};
use crate::model::AssessmentAnswers;
use crate::reference::{parse_answers, DataFormat};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// On-disk envelope written by [`FileAnswerStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedAssessment<'a> {
    pub saved_date: DateTime<Utc>,
    pub questions_answered: usize,
    pub answers: &'a AssessmentAnswers,
}

/// Stores the answer-set as a JSON envelope `{saved_date, questions_answered, answers}`.
///
/// Loading also accepts a bare `{question_id: label}` map.
#[derive(Debug, Clone)]
pub struct FileAnswerStore {
    path: PathBuf,
}

impl FileAnswerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's data directory
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("ea-assess").join("autosave.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnswerStore for FileAnswerStore {
    fn save(&mut self, answers: &AssessmentAnswers) -> Result<()> {
        let envelope = SavedAssessment {
            saved_date: Utc::now(),
            questions_answered: answers.len(),
            answers,
        };
        let json = serde_json::to_string_pretty(&envelope).map_err(|e| {
            AssessError::storage(
                format!("writing {}", self.path.display()),
                StorageErrorKind::Serialization(e.to_string()),
            )
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| AssessError::io(parent, e))?;
            }
        }
        std::fs::write(&self.path, json).map_err(|e| AssessError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), answered = answers.len(), "Saved answer-set");
        Ok(())
    }

    fn load(&self) -> Result<Option<AssessmentAnswers>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AssessError::io(&self.path, e)),
        };
        parse_answers(&content, DataFormat::Json)
            .map(Some)
            .map_err(|e| {
                AssessError::storage(
                    format!("reading {}", self.path.display()),
                    StorageErrorKind::Corrupt(e.to_string()),
                )
            })
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssessError::io(&self.path, e)),
        }
    }
}
