//! Reference data: loading and integrity checks.
//!
//! The scoring engine consumes a [`ReferenceData`] bundle (taxonomy, question
//! bank and gap catalog). Each part can come from a YAML or JSON file, or
//! fall back to the copy bundled with the crate.

mod loader;
mod validation;

pub use loader::{
    load_answers, load_gap_catalog, load_questions, load_taxonomy, parse_answers, standard_questions,
    DataFormat,
};
pub use validation::{
    validate_answers, validate_reference, IntegrityIssue, IssueSeverity, ValidationReport,
};

use crate::error::Result;
use crate::model::{GapCatalog, Question, Taxonomy};
use std::path::Path;

/// Static inputs of an assessment.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub taxonomy: Taxonomy,
    pub questions: Vec<Question>,
    pub catalog: GapCatalog,
}

impl ReferenceData {
    /// Bundle already-loaded reference data
    #[must_use]
    pub const fn new(taxonomy: Taxonomy, questions: Vec<Question>, catalog: GapCatalog) -> Self {
        Self {
            taxonomy,
            questions,
            catalog,
        }
    }

    /// The bundled taxonomy, starter question bank and gap catalog.
    pub fn standard() -> Result<Self> {
        Ok(Self::new(
            Taxonomy::standard()?,
            standard_questions()?,
            GapCatalog::standard()?,
        ))
    }

    /// Load reference data, using the bundled copy for any part without a path.
    pub fn load(
        taxonomy: Option<&Path>,
        questions: Option<&Path>,
        gap_rules: Option<&Path>,
    ) -> Result<Self> {
        let taxonomy = match taxonomy {
            Some(path) => load_taxonomy(path)?,
            None => Taxonomy::standard()?,
        };
        let questions = match questions {
            Some(path) => load_questions(path)?,
            None => standard_questions()?,
        };
        let catalog = match gap_rules {
            Some(path) => load_gap_catalog(path)?,
            None => GapCatalog::standard()?,
        };

        tracing::info!(
            layers = taxonomy.layers.len(),
            components = taxonomy.component_count(),
            questions = questions.len(),
            gap_rules = catalog.len(),
            "Loaded reference data"
        );

        Ok(Self::new(taxonomy, questions, catalog))
    }

    /// Look up a question by ID
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
