//! In-memory answer store.

use super::AnswerStore;
use crate::error::Result;
use crate::model::AssessmentAnswers;

/// Keeps the last saved answer-set in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAnswerStore {
    saved: Option<AssessmentAnswers>,
    save_count: usize,
}

impl MemoryAnswerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.save_count
    }
}

impl AnswerStore for MemoryAnswerStore {
    fn save(&mut self, answers: &AssessmentAnswers) -> Result<()> {
        self.saved = Some(answers.clone());
        self.save_count += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<AssessmentAnswers>> {
        Ok(self.saved.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.saved = None;
        Ok(())
    }
}
