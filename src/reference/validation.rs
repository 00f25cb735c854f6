//! Integrity checks for reference data and answer-sets.
//!
//! The scoring engine tolerates every problem reported here by skipping the
//! offending reference. These checks exist so authors find such typos before
//! they silently drop evidence from a report.

use super::ReferenceData;
use crate::model::{AssessmentAnswers, GapCatalog, Question, Taxonomy};
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static COMPONENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\d+$").expect("static regex"));
static QUESTION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Q\d+(\.\d+)*$").expect("static regex"));
static GAP_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^G\d{3}$").expect("static regex"));

/// How serious an integrity issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Tolerated by the engine, but probably a mistake
    Warning,
    /// Makes results ambiguous
    Error,
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single integrity finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityIssue {
    pub severity: IssueSeverity,
    /// Record the issue is about, e.g. `question Q2.1`
    pub location: String,
    pub message: String,
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.location, self.message)
    }
}

/// Collected integrity findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<IntegrityIssue>,
}

impl ValidationReport {
    fn push(&mut self, severity: IssueSeverity, location: impl Into<String>, message: impl Into<String>) {
        self.issues.push(IntegrityIssue {
            severity,
            location: location.into(),
            message: message.into(),
        });
    }

    /// Record an error found outside the reference checks, e.g. an unreadable answer-set.
    pub fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.push(IssueSeverity::Error, location, message);
    }

    fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.push(IssueSeverity::Warning, location, message);
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// No issues at all
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Append another report's issues
    pub fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }
}

/// Check a reference bundle for authoring mistakes.
#[must_use]
pub fn validate_reference(reference: &ReferenceData) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_taxonomy(&reference.taxonomy, &mut report);
    check_questions(&reference.questions, &reference.taxonomy, &reference.catalog, &mut report);
    check_catalog(&reference.catalog, &reference.taxonomy, &mut report);
    tracing::debug!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "Validated reference data"
    );
    report
}

fn check_taxonomy(taxonomy: &Taxonomy, report: &mut ValidationReport) {
    let mut layer_ids = HashSet::new();
    let mut component_ids = HashSet::new();

    for layer in &taxonomy.layers {
        if !layer_ids.insert(layer.id) {
            report.error(format!("layer {}", layer.id), "duplicate layer ID");
        }
        for component in &layer.components {
            let location = format!("component {}", component.id);
            if !component_ids.insert(component.id.as_str()) {
                report.error(&location, "duplicate component ID");
            }
            match COMPONENT_ID.captures(&component.id) {
                Some(caps) => {
                    if caps[1] != layer.id.to_string() {
                        report.warning(
                            &location,
                            format!("ID prefix does not match its layer {}", layer.id),
                        );
                    }
                }
                None => report.warning(&location, "ID is not of the form <layer>.<n>"),
            }
        }
    }
}

fn check_questions(
    questions: &[Question],
    taxonomy: &Taxonomy,
    catalog: &GapCatalog,
    report: &mut ValidationReport,
) {
    let mut seen = HashSet::new();

    for question in questions {
        let location = format!("question {}", question.id);

        if !seen.insert(question.id.as_str()) {
            report.error(&location, "duplicate question ID");
        }
        if !QUESTION_ID.is_match(&question.id) {
            report.warning(&location, "ID is not of the form Q<n>.<n>");
        }
        if question.answers.is_empty() {
            report.error(&location, "question has no answers");
        }
        if !(question.weight.is_finite() && question.weight > 0.0) {
            report.warning(
                &location,
                format!("weight {} is not positive; 1.0 is used instead", question.weight),
            );
        }
        for component_id in &question.affects_components {
            if !taxonomy.contains_component(component_id) {
                report.warning(
                    &location,
                    format!("affects unknown component '{component_id}'"),
                );
            }
        }

        let mut labels: HashMap<&str, usize> = HashMap::new();
        for answer in &question.answers {
            *labels.entry(answer.label.as_str()).or_default() += 1;
            for gap_id in &answer.triggers_gaps {
                if !catalog.contains(gap_id) {
                    report.warning(
                        &location,
                        format!("answer '{}' triggers unknown gap '{gap_id}'", answer.label),
                    );
                }
            }
        }
        let mut duplicates: Vec<&str> = labels
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(label, _)| label)
            .collect();
        duplicates.sort_unstable();
        for label in duplicates {
            report.error(&location, format!("duplicate answer label '{label}'"));
        }
    }
}

fn check_catalog(catalog: &GapCatalog, taxonomy: &Taxonomy, report: &mut ValidationReport) {
    for id in catalog.duplicate_ids() {
        report.error(format!("gap {id}"), "duplicate gap ID; the later definition was kept");
    }

    for rule in catalog.iter() {
        let location = format!("gap {}", rule.id);
        if !GAP_ID.is_match(&rule.id) {
            report.warning(&location, "ID is not of the form G<nnn>");
        }
        match taxonomy.layer_of(&rule.component_id) {
            None => report.warning(
                &location,
                format!("component '{}' is not in the taxonomy", rule.component_id),
            ),
            Some(layer) if layer.id != rule.layer => report.error(
                &location,
                format!(
                    "layer {} does not match component '{}' in layer {}",
                    rule.layer, rule.component_id, layer.id
                ),
            ),
            Some(_) => {}
        }
    }
}

/// Check an answer-set against a question bank.
///
/// Unknown question IDs and labels that match no answer are warnings; both
/// are ignored by scoring.
#[must_use]
pub fn validate_answers(answers: &AssessmentAnswers, questions: &[Question]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let by_id: HashMap<&str, &Question> = questions.iter().map(|q| (q.id.as_str(), q)).collect();

    for (question_id, label) in answers.iter() {
        let location = format!("answer {question_id}");
        match by_id.get(question_id) {
            None => report.warning(&location, "no question with this ID"),
            Some(question) => {
                if question.resolve_answer(label).is_none() {
                    report.warning(&location, format!("label '{label}' matches no answer"));
                }
            }
        }
    }
    report
}
