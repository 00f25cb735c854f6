//! Recommendation prioritizer.

use super::{DetectedGap, GapAnalysisResult};
use crate::model::{GapRule, PriorityBand};
use serde::Serialize;

/// A ranked remediation recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritizedRecommendation {
    /// 1-based position in the top gaps
    pub rank: usize,
    pub gap: DetectedGap,
    pub rationale: String,
    /// High payoff at manageable cost
    pub quick_wins: bool,
}

/// Explain a rule's priority in one line.
///
/// `Priority Score: 12.5 (Risk: 5, Impact: 5, Cost: 2)`, followed by a
/// critical or quick-win remark where one applies.
#[must_use]
pub fn rationale_for(rule: &GapRule) -> String {
    let mut rationale = format!(
        "Priority Score: {:.1} (Risk: {}, Impact: {}, Cost: {})",
        crate::utils::round1(rule.priority_score()),
        rule.risk,
        rule.business_impact,
        rule.remediation_cost.value()
    );
    if rule.priority_band() == PriorityBand::Critical {
        rationale.push_str(". Critical priority - address immediately.");
    } else if rule.is_quick_win() {
        rationale.push_str(". Quick win - high impact, manageable cost.");
    }
    rationale
}

/// Rank the top gaps of an analysis as recommendations.
#[must_use]
pub fn prioritize_recommendations(analysis: &GapAnalysisResult) -> Vec<PrioritizedRecommendation> {
    analysis
        .top_gaps
        .iter()
        .enumerate()
        .map(|(i, gap)| PrioritizedRecommendation {
            rank: i + 1,
            rationale: rationale_for(&gap.rule),
            quick_wins: gap.rule.is_quick_win(),
            gap: gap.clone(),
        })
        .collect()
}
