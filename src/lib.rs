//! **Enterprise architecture self-assessment: maturity scoring and gap analysis.**
//!
//! `ea-assess` scores a questionnaire answer-set against a layered enterprise
//! architecture taxonomy. It produces weighted maturity scores per component,
//! per layer and overall. It also detects capability gaps and ranks them by
//! risk, business impact and remediation cost.
//!
//! The engine is pure and synchronous: every entry point takes the answers
//! and reference data by reference and returns fresh results. It never fails.
//! Unknown question IDs, stale answer labels and unknown gap IDs are skipped,
//! and the [`reference`] validator is where such authoring mistakes surface.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: Taxonomy, question bank, gap catalog and the
//!   [`AssessmentAnswers`] map from question ID to selected answer label.
//! - **[`maturity`]**: The [`MaturityCalculator`] and narrative insights.
//! - **[`gaps`]**: The [`GapDetector`], recommendation prioritizer, filters,
//!   roadmap phasing and flat exports.
//! - **[`reference`]**: Loading reference data from YAML or JSON (with bundled
//!   defaults) and integrity checks.
//! - **[`pipeline`]**: [`evaluate`] runs every stage over one answer-set.
//! - **[`reports`]**: Summary, JSON, CSV and Markdown report generators.
//! - **[`storage`]**: The [`AnswerStore`] trait, its file and in-memory stores,
//!   and named snapshots.
//!
//! ## Getting Started
//!
//! ```no_run
//! use ea_assess::{evaluate, AssessmentAnswers, ReferenceData};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reference = ReferenceData::standard()?;
//!
//!     let mut answers = AssessmentAnswers::new();
//!     answers.answer("Q7.1", "SSO with MFA for admins");
//!
//!     let results = evaluate(&answers, &reference);
//!     println!(
//!         "Overall maturity {:.1} ({})",
//!         results.maturity.overall_maturity_score, results.maturity.overall_maturity_label
//!     );
//!     for rec in &results.recommendations {
//!         println!("{}. {} ({})", rec.rank, rec.gap.rule.recommendation.title, rec.rationale);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Scoring Against Custom Reference Data
//!
//! ```no_run
//! use std::path::Path;
//! use ea_assess::{calculate_maturity, detect_gaps, load_answers, ReferenceData};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reference = ReferenceData::load(
//!         None,
//!         Some(Path::new("my-questions.yaml")),
//!         Some(Path::new("my-gaps.yaml")),
//!     )?;
//!     let answers = load_answers(Path::new("answers.json"))?;
//!
//!     let maturity = calculate_maturity(&answers, &reference.questions, &reference.taxonomy);
//!     let gaps = detect_gaps(&answers, &reference.questions, &reference.catalog);
//!     println!("{} layers assessed, {} gaps", maturity.layers.len(), gaps.total_gaps);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `ea-assess` library crate. The binary of the
//! same name records answers, renders reports and gates CI on critical gaps
//! or a minimum maturity score.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: count↔f64 casts in percentages and averages are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Report generators build output in one pass
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::unused_self,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod gaps;
pub mod maturity;
pub mod model;
pub mod pipeline;
pub mod reference;
pub mod reports;
pub mod storage;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use error::{AssessError, ErrorContext, Result};
pub use gaps::{
    detect_gaps, prioritize_recommendations, DetectedGap, GapAnalysisResult, GapDetector,
    PrioritizedRecommendation,
};
pub use maturity::{calculate_maturity, MaturityCalculator, MaturitySummary};
pub use model::{
    AssessmentAnswers, GapCatalog, GapRule, MaturityLevel, PriorityBand, Question, Taxonomy,
};
pub use pipeline::{evaluate, AssessmentResults};
pub use reference::{load_answers, validate_reference, ReferenceData};
pub use reports::{ReportFormat, ReportGenerator};
pub use storage::{AnswerStore, FileAnswerStore, MemoryAnswerStore, SnapshotStore};
