//! Flat gap export record.

use super::GapAnalysisResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Gap counts per priority band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Headline numbers of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapExportSummary {
    pub total_gaps: usize,
    pub by_priority: PriorityCounts,
    pub estimated_cost: String,
    pub expected_roi: String,
}

/// One gap flattened for spreadsheets and downstream tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapExportRow {
    pub id: String,
    pub description: String,
    pub priority: String,
    pub priority_score: f64,
    pub layer: u8,
    pub component: String,
    pub risk: u8,
    pub impact: u8,
    pub cost: u8,
    pub recommendation: String,
    pub timeline: String,
    pub estimated_cost: String,
    pub expected_roi: String,
}

/// Structured export of a gap analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapExport {
    pub generated_date: DateTime<Utc>,
    pub summary: GapExportSummary,
    pub gaps: Vec<GapExportRow>,
}

impl GapExport {
    /// Build an export stamped with `generated_date`.
    #[must_use]
    pub fn from_analysis(analysis: &GapAnalysisResult, generated_date: DateTime<Utc>) -> Self {
        Self {
            generated_date,
            summary: GapExportSummary {
                total_gaps: analysis.total_gaps,
                by_priority: PriorityCounts {
                    critical: analysis.critical_gaps,
                    high: analysis.high_gaps,
                    medium: analysis.medium_gaps,
                    low: analysis.low_gaps,
                },
                estimated_cost: analysis.total_estimated_cost.clone(),
                expected_roi: analysis.total_expected_roi.clone(),
            },
            gaps: analysis
                .gaps
                .iter()
                .map(|g| GapExportRow {
                    id: g.rule.id.clone(),
                    description: g.rule.description.clone(),
                    priority: g.priority_band().name().to_string(),
                    priority_score: g.priority_score(),
                    layer: g.rule.layer,
                    component: g.rule.component_id.clone(),
                    risk: g.rule.risk.value(),
                    impact: g.rule.business_impact.value(),
                    cost: g.rule.remediation_cost.value(),
                    recommendation: g.rule.recommendation.title.clone(),
                    timeline: g.rule.recommendation.timeline.clone(),
                    estimated_cost: g.rule.recommendation.estimated_cost.clone(),
                    expected_roi: g.rule.recommendation.expected_roi.clone(),
                })
                .collect(),
        }
    }

    /// Build an export stamped with the current time.
    #[must_use]
    pub fn now(analysis: &GapAnalysisResult) -> Self {
        Self::from_analysis(analysis, Utc::now())
    }
}
