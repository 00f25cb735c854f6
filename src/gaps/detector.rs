//! Gap detector.

use super::cost::{estimated_cost_usd, expected_roi_usd, format_currency};
use crate::model::{AssessmentAnswers, GapCatalog, GapRule, PriorityBand, Question};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of gaps kept in [`GapAnalysisResult::top_gaps`].
pub const TOP_GAP_COUNT: usize = 10;

/// How sure the detector is that a gap is real.
///
/// Every detection currently resolves to `High`; the lower levels are
/// reserved for a future scoring model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DetectionConfidence {
    #[default]
    High,
    Medium,
    Low,
}

/// A catalog rule fired by at least one selected answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedGap {
    #[serde(flatten)]
    pub rule: GapRule,
    /// Question IDs whose selected answer triggered this gap, in scan order
    pub triggered_by: Vec<String>,
    pub detection_confidence: DetectionConfidence,
}

impl DetectedGap {
    fn new(rule: GapRule, question_id: &str) -> Self {
        Self {
            rule,
            triggered_by: vec![question_id.to_string()],
            detection_confidence: DetectionConfidence::High,
        }
    }

    /// Derived priority score of the underlying rule
    #[must_use]
    pub fn priority_score(&self) -> f64 {
        self.rule.priority_score()
    }

    /// Derived priority band of the underlying rule
    #[must_use]
    pub fn priority_band(&self) -> PriorityBand {
        self.rule.priority_band()
    }
}

/// Outcome of a gap scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysisResult {
    pub total_gaps: usize,
    pub critical_gaps: usize,
    pub high_gaps: usize,
    pub medium_gaps: usize,
    pub low_gaps: usize,
    /// All detected gaps, highest priority first
    pub gaps: Vec<DetectedGap>,
    /// The first [`TOP_GAP_COUNT`] of `gaps`
    pub top_gaps: Vec<DetectedGap>,
    /// Gaps grouped by layer; only layers with gaps appear
    pub gaps_by_layer: BTreeMap<u8, Vec<DetectedGap>>,
    /// Formatted sum of cost midpoints
    pub total_estimated_cost: String,
    /// Formatted sum of expected returns
    pub total_expected_roi: String,
    pub estimated_cost_usd: f64,
    pub expected_roi_usd: f64,
}

impl GapAnalysisResult {
    fn from_sorted(gaps: Vec<DetectedGap>) -> Self {
        let count = |band: PriorityBand| gaps.iter().filter(|g| g.priority_band() == band).count();

        let mut gaps_by_layer: BTreeMap<u8, Vec<DetectedGap>> = BTreeMap::new();
        for gap in &gaps {
            gaps_by_layer
                .entry(gap.rule.layer)
                .or_default()
                .push(gap.clone());
        }

        let cost = estimated_cost_usd(&gaps);
        let roi = expected_roi_usd(&gaps);

        Self {
            total_gaps: gaps.len(),
            critical_gaps: count(PriorityBand::Critical),
            high_gaps: count(PriorityBand::High),
            medium_gaps: count(PriorityBand::Medium),
            low_gaps: count(PriorityBand::Low),
            top_gaps: gaps.iter().take(TOP_GAP_COUNT).cloned().collect(),
            gaps_by_layer,
            total_estimated_cost: format_currency(cost),
            total_expected_roi: format_currency(roi),
            estimated_cost_usd: cost,
            expected_roi_usd: roi,
            gaps,
        }
    }

    /// Look up a detected gap by rule ID
    #[must_use]
    pub fn get(&self, gap_id: &str) -> Option<&DetectedGap> {
        self.gaps.iter().find(|g| g.rule.id == gap_id)
    }

    /// Whether any critical gap was detected
    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.critical_gaps > 0
    }
}

/// Gap detection engine bound to a rule catalog.
#[derive(Debug, Clone, Copy)]
pub struct GapDetector<'a> {
    catalog: &'a GapCatalog,
}

impl<'a> GapDetector<'a> {
    /// Create a detector for a catalog
    #[must_use]
    pub const fn new(catalog: &'a GapCatalog) -> Self {
        Self { catalog }
    }

    /// Scan an answer-set for triggered gaps.
    ///
    /// A gap triggered by several questions appears once, with every
    /// triggering question in `triggered_by`. Gaps are ordered by priority
    /// score descending; equal scores keep catalog order.
    #[must_use]
    pub fn detect(&self, answers: &AssessmentAnswers, questions: &[Question]) -> GapAnalysisResult {
        let mut detected: IndexMap<&str, DetectedGap> = IndexMap::new();

        for question in questions {
            let Some(answer) = question.selected_answer(answers) else {
                continue;
            };
            for gap_id in &answer.triggers_gaps {
                let Some(rule) = self.catalog.get(gap_id) else {
                    tracing::debug!(question_id = %question.id, gap_id = %gap_id, "Trigger references unknown gap");
                    continue;
                };
                detected
                    .entry(rule.id.as_str())
                    .and_modify(|gap| {
                        gap.triggered_by.push(question.id.clone());
                        gap.detection_confidence = DetectionConfidence::High;
                    })
                    .or_insert_with(|| DetectedGap::new(rule.clone(), &question.id));
            }
        }

        let mut gaps: Vec<DetectedGap> = detected.into_values().collect();
        gaps.sort_by(|a, b| {
            b.priority_score()
                .total_cmp(&a.priority_score())
                .then_with(|| self.position(a).cmp(&self.position(b)))
        });

        tracing::debug!(total_gaps = gaps.len(), "Detected gaps");
        GapAnalysisResult::from_sorted(gaps)
    }

    fn position(&self, gap: &DetectedGap) -> usize {
        self.catalog.position(&gap.rule.id).unwrap_or(usize::MAX)
    }
}

/// Scan an answer-set for triggered gaps against a catalog.
#[must_use]
pub fn detect_gaps(
    answers: &AssessmentAnswers,
    questions: &[Question],
    catalog: &GapCatalog,
) -> GapAnalysisResult {
    GapDetector::new(catalog).detect(answers, questions)
}
