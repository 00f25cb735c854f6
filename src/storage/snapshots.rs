//! Named assessment snapshots.
//!
//! Snapshots are kept as a JSON array next to the autosave, oldest first.
//! Indexes are positions in that array and shift down when an earlier entry
//! is deleted.

use crate::error::{AssessError, Result, StorageErrorKind};
use crate::model::AssessmentAnswers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name given to a snapshot saved without one
pub const DEFAULT_SNAPSHOT_NAME: &str = "Current Assessment";

/// An answer-set frozen under a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub saved_date: DateTime<Utc>,
    pub questions_answered: usize,
    pub answers: AssessmentAnswers,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, answers: AssessmentAnswers) -> Self {
        Self {
            name: name.into(),
            saved_date: Utc::now(),
            questions_answered: answers.len(),
            answers,
        }
    }
}

/// Snapshot list persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot file kept beside an autosave file, e.g. `autosave.snapshots.json`
    #[must_use]
    pub fn beside(autosave: &Path) -> Self {
        Self::new(autosave.with_extension("snapshots.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All snapshots, oldest first. A missing file is an empty list.
    pub fn list(&self) -> Result<Vec<Snapshot>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AssessError::io(&self.path, e)),
        };
        serde_json::from_str(&content).map_err(|e| {
            AssessError::storage(
                format!("reading {}", self.path.display()),
                StorageErrorKind::Corrupt(e.to_string()),
            )
        })
    }

    /// Append a snapshot of `answers`, returning its index.
    pub fn save(&mut self, name: impl Into<String>, answers: &AssessmentAnswers) -> Result<usize> {
        let mut snapshots = self.list()?;
        snapshots.push(Snapshot::new(name, answers.clone()));
        self.write(&snapshots)?;
        Ok(snapshots.len() - 1)
    }

    /// The snapshot at `index`, `None` when out of range
    pub fn load(&self, index: usize) -> Result<Option<Snapshot>> {
        Ok(self.list()?.into_iter().nth(index))
    }

    /// Remove and return the snapshot at `index`; nothing is written when out of range.
    pub fn delete(&mut self, index: usize) -> Result<Option<Snapshot>> {
        let mut snapshots = self.list()?;
        if index >= snapshots.len() {
            return Ok(None);
        }
        let removed = snapshots.remove(index);
        self.write(&snapshots)?;
        tracing::debug!(path = %self.path.display(), name = %removed.name, "Deleted snapshot");
        Ok(Some(removed))
    }

    fn write(&self, snapshots: &[Snapshot]) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshots).map_err(|e| {
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
        tracing::debug!(path = %self.path.display(), count = snapshots.len(), "Saved snapshots");
        Ok(())
    }
}
