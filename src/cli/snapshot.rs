//! Snapshot command handlers.
//!
//! Snapshots are numbered from 1 on the command line, in the order
//! `snapshot list` prints them.

use crate::config::AppConfig;
use crate::maturity::{calculate_maturity, compare_maturity, MaturitySummary};
use crate::model::AssessmentAnswers;
use crate::pipeline::exit_codes;
use crate::storage::{AnswerStore, Snapshot, SnapshotStore, DEFAULT_SNAPSHOT_NAME};
use anyhow::{bail, Context, Result};

/// Save the current answer-set as a named snapshot.
pub fn run_snapshot_save(config: &AppConfig, name: Option<&str>) -> Result<i32> {
    let answers = super::open_store(&config.storage)?.load()?.unwrap_or_default();
    if answers.is_empty() {
        bail!("No saved answers to snapshot; record some with `ea-assess answer` first");
    }

    let mut snapshots = super::open_snapshots(&config.storage)?;
    let name = name.unwrap_or(DEFAULT_SNAPSHOT_NAME);
    let index = snapshots.save(name, &answers)?;
    tracing::info!("Saved snapshot to {}", snapshots.path().display());
    if !config.behavior.quiet {
        println!("Saved snapshot {}: {name} ({} answered)", index + 1, answers.len());
    }
    Ok(exit_codes::SUCCESS)
}

/// Print the saved snapshots.
pub fn run_snapshot_list(config: &AppConfig) -> Result<i32> {
    let snapshots = super::open_snapshots(&config.storage)?.list()?;
    print!("{}", format_list(&snapshots));
    Ok(exit_codes::SUCCESS)
}

/// Replace the current answer-set with a snapshot's answers.
pub fn run_snapshot_load(config: &AppConfig, number: usize) -> Result<i32> {
    let snapshot = find(&super::open_snapshots(&config.storage)?, number)?;
    let mut store = super::open_store(&config.storage)?;
    store.save(&snapshot.answers)?;
    if !config.behavior.quiet {
        println!(
            "Restored snapshot {number}: {} ({} answered)",
            snapshot.name, snapshot.questions_answered
        );
    }
    Ok(exit_codes::SUCCESS)
}

/// Delete a snapshot; later snapshots move up one number.
pub fn run_snapshot_delete(config: &AppConfig, number: usize) -> Result<i32> {
    let mut snapshots = super::open_snapshots(&config.storage)?;
    let Some(removed) = snapshots.delete(index(number)?)? else {
        bail!("No snapshot {number}; see `ea-assess snapshot list`");
    };
    if !config.behavior.quiet {
        println!("Deleted snapshot {number}: {}", removed.name);
    }
    Ok(exit_codes::SUCCESS)
}

/// Compare layer maturity between two snapshots, or one snapshot and the
/// current answers when `after` is `None`.
pub fn run_snapshot_compare(config: &AppConfig, before: usize, after: Option<usize>) -> Result<i32> {
    let reference = super::load_reference(&config.reference)?;
    let snapshots = super::open_snapshots(&config.storage)?;

    let earlier = find(&snapshots, before)?;
    let (later_name, later_answers) = match after {
        Some(number) => {
            let snapshot = find(&snapshots, number)?;
            (snapshot.name, snapshot.answers)
        }
        None => (
            "current answers".to_string(),
            super::open_store(&config.storage)?.load()?.unwrap_or_default(),
        ),
    };

    let score = |answers: &AssessmentAnswers| {
        calculate_maturity(answers, &reference.questions, &reference.taxonomy)
    };
    print!(
        "{}",
        format_comparison(
            &earlier.name,
            &score(&earlier.answers),
            &later_name,
            &score(&later_answers)
        )
    );
    Ok(exit_codes::SUCCESS)
}

fn index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .context("Snapshot numbers start at 1")
}

fn find(snapshots: &SnapshotStore, number: usize) -> Result<Snapshot> {
    match snapshots.load(index(number)?)? {
        Some(snapshot) => Ok(snapshot),
        None => bail!("No snapshot {number}; see `ea-assess snapshot list`"),
    }
}

fn format_list(snapshots: &[Snapshot]) -> String {
    if snapshots.is_empty() {
        return "No saved snapshots\n".to_string();
    }
    snapshots
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "{:>3}. {} ({}, {} answered)\n",
                i + 1,
                s.name,
                s.saved_date.format("%Y-%m-%d %H:%M"),
                s.questions_answered
            )
        })
        .collect()
}

fn format_comparison(
    before_name: &str,
    before: &MaturitySummary,
    after_name: &str,
    after: &MaturitySummary,
) -> String {
    let mut out = format!("{before_name} -> {after_name}\n\n");
    out.push_str(&format!(
        "Overall maturity: {:.1} -> {:.1}\n",
        before.overall_maturity_score, after.overall_maturity_score
    ));

    let comparisons = compare_maturity(before, after);
    if comparisons.is_empty() {
        out.push_str("No layers assessed in the earlier answers\n");
        return out;
    }
    out.push('\n');
    for c in comparisons {
        out.push_str(&format!(
            "  {:<34} {:.1} -> {:.1}  {:+.1} ({:+}%)\n",
            c.layer_name, c.before_score, c.after_score, c.improvement, c.percentage_change
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;
    use crate::storage::FileAnswerStore;
    use std::path::Path;

    fn config(dir: &Path) -> AppConfig {
        AppConfig::builder()
            .autosave_path(Some(dir.join("autosave.json")))
            .quiet(true)
            .build()
    }

    fn record(config: &AppConfig, label: &str) {
        crate::cli::run_answer(config, "Q7.1", label).unwrap();
    }

    #[test]
    fn test_save_load_delete_flow() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config(tmp.path());
        let autosave = FileAnswerStore::new(tmp.path().join("autosave.json"));
        let snapshots = SnapshotStore::beside(autosave.path());

        record(&config, "Passwords only, separate per system");
        run_snapshot_save(&config, Some("Baseline")).unwrap();
        record(&config, "SSO with MFA for everyone");
        run_snapshot_save(&config, None).unwrap();

        let names: Vec<String> = snapshots.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Baseline", DEFAULT_SNAPSHOT_NAME]);

        run_snapshot_load(&config, 1).unwrap();
        let current = autosave.load().unwrap().unwrap();
        assert_eq!(current.selected("Q7.1"), Some("Passwords only, separate per system"));

        run_snapshot_delete(&config, 1).unwrap();
        assert_eq!(snapshots.load(0).unwrap().unwrap().name, DEFAULT_SNAPSHOT_NAME);
    }

    #[test]
    fn test_unknown_numbers_are_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = config(tmp.path());

        let err = run_snapshot_load(&config, 1).unwrap_err();
        assert_eq!(err.to_string(), "No snapshot 1; see `ea-assess snapshot list`");
        let err = run_snapshot_delete(&config, 0).unwrap_err();
        assert_eq!(err.to_string(), "Snapshot numbers start at 1");
    }

    #[test]
    fn test_save_needs_answers() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = run_snapshot_save(&config(tmp.path()), None).unwrap_err();
        assert!(err.to_string().starts_with("No saved answers to snapshot"));
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&[]), "No saved snapshots\n");

        let mut snapshot = Snapshot::new("Baseline", [("Q7.1", "x")].into_iter().collect());
        snapshot.saved_date = "2026-03-01T09:30:00Z".parse().unwrap();
        assert_eq!(
            format_list(&[snapshot]),
            "  1. Baseline (2026-03-01 09:30, 1 answered)\n"
        );
    }

    #[test]
    fn test_format_comparison() {
        let reference = ReferenceData::standard().unwrap();
        let score = |label: &str| {
            let answers: AssessmentAnswers = [("Q7.1", label)].into_iter().collect();
            calculate_maturity(&answers, &reference.questions, &reference.taxonomy)
        };
        let text = format_comparison(
            "Baseline",
            &score("Passwords only, separate per system"),
            "current answers",
            &score("SSO with MFA for everyone"),
        );

        assert!(text.starts_with("Baseline -> current answers\n\nOverall maturity: 1.0 -> 4.0\n"));
        assert!(text.contains("Security, Identity & Governance"));
        assert!(text.contains("1.0 -> 4.0  +3.0 (+300%)"));
    }
}
