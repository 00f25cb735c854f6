//! Assess command handler.
//!
//! Implements the `assess` subcommand: load reference data and an answer-set,
//! evaluate, render the report and apply CI thresholds.

use crate::config::AppConfig;
use crate::model::AssessmentAnswers;
use crate::pipeline::{
    auto_detect_format, evaluate, exit_codes, should_use_color, write_output, OutputTarget,
};
use crate::reference::load_answers;
use crate::reports::{create_reporter_with_options, AssessmentReport};
use crate::storage::AnswerStore;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the assess command.
///
/// Answers come from `answers_path` when given, otherwise from the configured
/// answer store.
pub fn run_assess(config: &AppConfig, answers_path: Option<&Path>) -> Result<i32> {
    let reference = super::load_reference(&config.reference)?;
    let answers = read_answers(config, answers_path)?;

    let results = evaluate(&answers, &reference);
    tracing::info!(
        "Overall maturity {:.1} from {} answer(s), {} gap(s)",
        results.maturity.overall_maturity_score,
        results.maturity.questions_answered,
        results.gaps.total_gaps
    );

    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);
    let use_color = should_use_color(config.output.no_color) && target.is_terminal();
    let reporter = create_reporter_with_options(format, use_color);

    let mut report_config = config.output.report_config();
    report_config.metadata.answers_path = answers_path.map(|p| p.display().to_string());

    let content = reporter
        .generate(
            &AssessmentReport::new(&answers, &results, &reference),
            &report_config,
        )
        .with_context(|| format!("Failed to generate {format} report"))?;
    write_output(&content, &target, config.behavior.quiet)?;

    let failures = results.threshold_failures(
        config.behavior.fail_on_critical,
        config.behavior.min_maturity,
    );
    if failures.is_empty() {
        return Ok(exit_codes::SUCCESS);
    }
    for failure in &failures {
        tracing::warn!("Threshold failed: {failure}");
    }
    if !config.behavior.quiet {
        eprintln!("Assessment failed: {}", failures.join("; "));
    }
    Ok(exit_codes::THRESHOLD_FAILED)
}

fn read_answers(config: &AppConfig, answers_path: Option<&Path>) -> Result<AssessmentAnswers> {
    if let Some(path) = answers_path {
        return load_answers(path)
            .with_context(|| format!("Failed to load answers from {}", path.display()));
    }

    let store = super::open_store(&config.storage)?;
    match store.load()? {
        Some(answers) => {
            tracing::info!("Using saved answers from {}", store.path().display());
            Ok(answers)
        }
        None => {
            tracing::warn!(
                "No saved answers at {}; assessing an empty answer-set",
                store.path().display()
            );
            Ok(AssessmentAnswers::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ReportFormat, ReportType};
    use std::path::PathBuf;

    fn config(dir: &Path, format: ReportFormat) -> AppConfig {
        AppConfig::builder()
            .output_format(format)
            .output_file(Some(dir.join("report.out")))
            .autosave_path(Some(dir.join("autosave.json")))
            .quiet(true)
            .build()
    }

    #[test]
    fn test_assess_writes_json_report() {
        let tmp = tempfile::TempDir::new().unwrap();
        let answers = tmp.path().join("answers.json");
        std::fs::write(&answers, r#"{"Q7.1": "Passwords only, separate per system"}"#).unwrap();

        let config = config(tmp.path(), ReportFormat::Json);
        let code = run_assess(&config, Some(&answers)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let written = std::fs::read_to_string(tmp.path().join("report.out")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["gaps"]["summary"]["total_gaps"], 2);
    }

    #[test]
    fn test_assess_thresholds() {
        let tmp = tempfile::TempDir::new().unwrap();
        let answers = tmp.path().join("answers.json");
        std::fs::write(&answers, r#"{"Q7.1": "Passwords only, separate per system"}"#).unwrap();

        let mut config = config(tmp.path(), ReportFormat::Csv);
        config.behavior.fail_on_critical = true;
        assert_eq!(
            run_assess(&config, Some(&answers)).unwrap(),
            exit_codes::THRESHOLD_FAILED
        );

        config.behavior.fail_on_critical = false;
        config.behavior.min_maturity = Some(1.0);
        assert_eq!(run_assess(&config, Some(&answers)).unwrap(), exit_codes::SUCCESS);

        config.behavior.min_maturity = Some(1.5);
        assert_eq!(
            run_assess(&config, Some(&answers)).unwrap(),
            exit_codes::THRESHOLD_FAILED
        );
    }

    #[test]
    fn test_assess_empty_store() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = config(tmp.path(), ReportFormat::Markdown);
        config.output.report_types = vec![ReportType::Maturity];
        assert_eq!(run_assess(&config, None).unwrap(), exit_codes::SUCCESS);
        assert!(tmp.path().join("report.out").exists());
    }

    #[test]
    fn test_assess_missing_answers_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config(tmp.path(), ReportFormat::Json);
        let missing = PathBuf::from("/nonexistent/answers.json");
        assert!(run_assess(&config, Some(&missing)).is_err());
    }
}
