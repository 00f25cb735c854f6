//! Answer and reset command handlers.
//!
//! These mutate the saved answer-set. After each change the store is written
//! back and, for `answer`, the updated headline is printed.

use crate::config::AppConfig;
use crate::model::{MaturityLevel, NOT_ASSESSED_LABEL};
use crate::pipeline::{evaluate, exit_codes, AssessmentResults};
use crate::storage::AnswerStore;
use anyhow::{bail, Result};

/// Run the answer command: record `label` for `question_id` in the store.
///
/// Both the question and the label must exist in the question bank; the
/// scoring engine would silently ignore a typo.
pub fn run_answer(config: &AppConfig, question_id: &str, label: &str) -> Result<i32> {
    let reference = super::load_reference(&config.reference)?;

    let Some(question) = reference.question(question_id) else {
        bail!("Unknown question: {question_id}");
    };
    if question.resolve_answer(label).is_none() {
        let labels: Vec<&str> = question.answers.iter().map(|a| a.label.as_str()).collect();
        bail!(
            "'{label}' is not an answer to {question_id}. Valid answers:\n  {}",
            labels.join("\n  ")
        );
    }

    let mut store = super::open_store(&config.storage)?;
    let mut answers = store.load()?.unwrap_or_default();
    if let Some(previous) = answers.answer(question_id, label) {
        tracing::debug!(question = question_id, %previous, "Replaced answer");
    }
    store.save(&answers)?;
    tracing::info!("Saved answers to {}", store.path().display());

    if !config.behavior.quiet {
        let results = evaluate(&answers, &reference);
        println!("{question_id} = {label}");
        println!("{}", headline(&results));
    }

    Ok(exit_codes::SUCCESS)
}

/// Run the reset command: discard the saved answer-set.
pub fn run_reset(config: &AppConfig) -> Result<i32> {
    let mut store = super::open_store(&config.storage)?;
    store.clear()?;
    if !config.behavior.quiet {
        println!("Cleared saved answers at {}", store.path().display());
    }
    Ok(exit_codes::SUCCESS)
}

/// One-line status after an answer changes.
fn headline(results: &AssessmentResults) -> String {
    let maturity = &results.maturity;
    let gaps = &results.gaps;
    format!(
        "Overall maturity: {:.1}/5.0 ({}) | {}/{} answered ({}%) | {} gap{} ({} critical)",
        crate::utils::round1(maturity.overall_maturity_score),
        maturity
            .overall_maturity_level
            .map_or(NOT_ASSESSED_LABEL, MaturityLevel::name),
        maturity.questions_answered,
        maturity.total_questions,
        maturity.completion_percentage,
        gaps.total_gaps,
        if gaps.total_gaps == 1 { "" } else { "s" },
        gaps.critical_gaps
    )
}
