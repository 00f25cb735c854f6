//! Maturity scoring.
//!
//! Turns an answer-set into weighted maturity scores per component, per
//! layer and overall, plus the narrative insights derived from them.
//!
//! # Example
//!
//! ```no_run
//! use ea_assess::maturity::MaturityCalculator;
//! use ea_assess::model::{AssessmentAnswers, Taxonomy};
//!
//! # fn main() -> ea_assess::Result<()> {
//! let taxonomy = Taxonomy::standard()?;
//! let questions = Vec::new();
//! let summary = MaturityCalculator::new(&taxonomy).calculate(&AssessmentAnswers::new(), &questions);
//! assert_eq!(summary.overall_maturity_label, "Not assessed");
//! # Ok(())
//! # }
//! ```

mod calculator;
mod insights;

pub use calculator::{
    calculate_maturity, ComponentMaturity, LayerMaturity, MaturityCalculator, MaturitySummary,
};
pub use insights::{compare_maturity, maturity_insights, InsightKind, MaturityComparison, MaturityInsight};
