//! Reference data model for the assessment engine.
//!
//! Everything in this module is static, caller-supplied data: the layer and
//! component taxonomy, the question bank, and the gap rule catalog. The
//! one mutable record is [`AssessmentAnswers`], the sparse map from question
//! ID to selected answer label.
//!
//! The engine never creates or deletes reference records; it only derives
//! scores against them.

mod answers;
mod gap;
mod level;
mod question;
mod taxonomy;

pub use answers::AssessmentAnswers;
pub use gap::{
    priority_score_of, CostBand, GapCatalog, GapRule, InitiativeType, Investment, PriorityBand, Rating,
    Recommendation, ScoredGapRule,
};
pub use level::{MaturityLevel, OutOfDomain, NOT_ASSESSED_COLOR, NOT_ASSESSED_LABEL};
pub use question::{Answer, Question, QuestionCategory, DEFAULT_QUESTION_WEIGHT};
pub use taxonomy::{Component, Layer, Taxonomy};
