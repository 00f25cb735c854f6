//! Answer-set persistence.
//!
//! Scoring never touches storage. Orchestrators (the CLI, or an embedding
//! application) load an answer-set before evaluating and save it after each
//! change. Named snapshots of earlier answer-sets live beside the autosave.

mod file;
mod memory;
mod snapshots;

pub use file::{FileAnswerStore, SavedAssessment};
pub use memory::MemoryAnswerStore;
pub use snapshots::{Snapshot, SnapshotStore, DEFAULT_SNAPSHOT_NAME};

use crate::error::Result;
use crate::model::AssessmentAnswers;

/// Somewhere an answer-set can be saved and restored.
pub trait AnswerStore {
    /// Persist the answer-set, replacing any previous one
    fn save(&mut self, answers: &AssessmentAnswers) -> Result<()>;

    /// Restore the last saved answer-set, `None` if nothing was saved
    fn load(&self) -> Result<Option<AssessmentAnswers>>;

    /// Discard any saved answer-set
    fn clear(&mut self) -> Result<()>;
}
