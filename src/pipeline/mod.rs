//! Assessment orchestration.
//!
//! Runs the scoring engines over an answer-set and reference bundle and
//! decides CI exit codes, so CLI handlers stay thin.

mod output;

pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};

use crate::gaps::{
    prioritize_recommendations, roadmap_phases, GapAnalysisResult, GapDetector,
    PrioritizedRecommendation, RoadmapPhase,
};
use crate::maturity::{maturity_insights, MaturityCalculator, MaturityInsight, MaturitySummary};
use crate::model::AssessmentAnswers;
use crate::reference::ReferenceData;
use crate::utils::round1;
use serde::Serialize;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Assessment completed and every threshold held
    pub const SUCCESS: i32 = 0;
    /// A `--fail-on-critical` or `--min-maturity` threshold failed
    pub const THRESHOLD_FAILED: i32 = 1;
    /// Reference data has integrity errors
    pub const VALIDATION_FAILED: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Everything derived from one answer-set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResults {
    pub maturity: MaturitySummary,
    pub gaps: GapAnalysisResult,
    pub insights: Vec<MaturityInsight>,
    pub recommendations: Vec<PrioritizedRecommendation>,
    pub roadmap: Vec<RoadmapPhase>,
}

impl AssessmentResults {
    /// Reasons the results fail the given thresholds; empty when they pass.
    #[must_use]
    pub fn threshold_failures(&self, fail_on_critical: bool, min_maturity: Option<f64>) -> Vec<String> {
        let mut failures = Vec::new();

        if fail_on_critical && self.gaps.has_critical() {
            failures.push(format!(
                "{} critical gap{} detected",
                self.gaps.critical_gaps,
                if self.gaps.critical_gaps == 1 { "" } else { "s" }
            ));
        }

        if let Some(min) = min_maturity {
            let score = self.maturity.overall_maturity_score;
            if score < min {
                failures.push(format!(
                    "overall maturity {:.1} is below the required {:.1}",
                    round1(score),
                    round1(min)
                ));
            }
        }

        failures
    }
}

/// Score an answer-set against a reference bundle.
///
/// Pure over its inputs; calling it again with the same answers yields the
/// same results.
#[must_use]
pub fn evaluate(answers: &AssessmentAnswers, reference: &ReferenceData) -> AssessmentResults {
    let maturity = MaturityCalculator::new(&reference.taxonomy).calculate(answers, &reference.questions);
    let gaps = GapDetector::new(&reference.catalog).detect(answers, &reference.questions);
    let insights = maturity_insights(&maturity);
    let recommendations = prioritize_recommendations(&gaps);
    let roadmap = roadmap_phases(&gaps);

    tracing::debug!(
        answered = maturity.questions_answered,
        overall = maturity.overall_maturity_score,
        gaps = gaps.total_gaps,
        critical = gaps.critical_gaps,
        "Evaluated assessment"
    );

    AssessmentResults {
        maturity,
        gaps,
        insights,
        recommendations,
        roadmap,
    }
}
