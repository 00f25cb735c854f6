//! Validate command handler.
//!
//! Implements the `validate` subcommand: integrity checks over the reference
//! bundle and, when available, an answer-set.

use crate::config::AppConfig;
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::reference::{
    load_answers, validate_answers, validate_reference, IssueSeverity, ValidationReport,
};
use crate::reports::ReportFormat;
use crate::storage::AnswerStore;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the validate command.
///
/// Returns [`exit_codes::VALIDATION_FAILED`] when any error is found, or when
/// `fail_on_warning` is set and any warning is found.
pub fn run_validate(
    config: &AppConfig,
    answers_path: Option<&Path>,
    fail_on_warning: bool,
) -> Result<i32> {
    let reference = super::load_reference(&config.reference)?;
    let mut report = validate_reference(&reference);

    let answers = match answers_path {
        Some(path) => Some(
            load_answers(path)
                .with_context(|| format!("Failed to load answers from {}", path.display()))?,
        ),
        // No data directory means no autosave to check
        None => match super::open_store(&config.storage) {
            Ok(store) => match store.load() {
                Ok(answers) => answers,
                Err(err) => {
                    tracing::debug!(error = %err, "Autosave unreadable");
                    report.error(format!("autosave {}", store.path().display()), err.to_string());
                    None
                }
            },
            Err(_) => None,
        },
    };
    if let Some(answers) = &answers {
        report.merge(validate_answers(answers, &reference.questions));
    }

    let content = match config.output.format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&report).context("Failed to serialize validation report")?
        }
        _ => format_text(&report),
    };
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, config.behavior.quiet)?;

    let failed = report.has_errors() || (fail_on_warning && report.warning_count() > 0);
    if failed {
        tracing::warn!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Validation failed"
        );
        return Ok(exit_codes::VALIDATION_FAILED);
    }
    Ok(exit_codes::SUCCESS)
}

fn format_text(report: &ValidationReport) -> String {
    let mut lines = Vec::new();
    // Errors first, stable within each severity
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by_key(|i| std::cmp::Reverse(i.severity));
    for issue in issues {
        let marker = match issue.severity {
            IssueSeverity::Error => "✗",
            IssueSeverity::Warning => "!",
        };
        lines.push(format!("{marker} {issue}"));
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Validation {}: {} error(s), {} warning(s)",
        if report.has_errors() { "failed" } else { "passed" },
        report.error_count(),
        report.warning_count()
    ));
    lines.join("\n")
}
