//! Phased remediation roadmap.
//!
//! Gaps are scheduled into four phases from their priority band, cost band
//! and the timeline text of their recommendation. Phases are tried in order
//! and a gap lands in the first one that accepts it; gaps no phase accepts
//! stay off the roadmap.

use super::cost::{estimated_cost_usd, format_currency};
use super::{DetectedGap, GapAnalysisResult};
use crate::model::{CostBand, GapRule, PriorityBand};
use serde::Serialize;
use std::collections::HashSet;

/// One phase of the remediation roadmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapPhase {
    /// 1-based phase number
    pub number: u8,
    pub name: String,
    /// Calendar window, e.g. `Months 1-6`
    pub timeline: String,
    pub description: String,
    /// Gaps scheduled in this phase, in priority order
    pub gaps: Vec<DetectedGap>,
    /// Formatted cost of every gap the phase accepts
    pub estimated_cost: String,
    pub estimated_cost_usd: f64,
    pub critical_count: usize,
    pub high_count: usize,
}

struct PhaseDefinition {
    name: &'static str,
    timeline: &'static str,
    description: &'static str,
    accepts: fn(&GapRule) -> bool,
}

fn timeline_mentions(rule: &GapRule, window: &str) -> bool {
    rule.recommendation.timeline.contains(window)
}

fn quick_win_or_critical(rule: &GapRule) -> bool {
    (rule.priority_band() == PriorityBand::Critical || rule.remediation_cost <= CostBand::M)
        && timeline_mentions(rule, "3-6 months")
}

fn high_within_a_year(rule: &GapRule) -> bool {
    rule.priority_band() == PriorityBand::High
        && (timeline_mentions(rule, "6-12 months") || timeline_mentions(rule, "4-8 months"))
}

fn major_initiative(rule: &GapRule) -> bool {
    matches!(rule.priority_band(), PriorityBand::High | PriorityBand::Medium)
        && timeline_mentions(rule, "12-18 months")
}

fn long_term(rule: &GapRule) -> bool {
    timeline_mentions(rule, "18-36 months")
        || matches!(rule.priority_band(), PriorityBand::Medium | PriorityBand::Low)
}

const PHASES: [PhaseDefinition; 4] = [
    PhaseDefinition {
        name: "Quick Wins & Critical Fixes",
        timeline: "Months 1-6",
        description: "High-impact, low-cost improvements and critical security/compliance gaps",
        accepts: quick_win_or_critical,
    },
    PhaseDefinition {
        name: "Foundation Building",
        timeline: "Months 6-12",
        description: "Core platform deployments and high-priority system upgrades",
        accepts: high_within_a_year,
    },
    PhaseDefinition {
        name: "Transformation",
        timeline: "Months 12-24",
        description: "Major system replacements and enterprise-wide initiatives",
        accepts: major_initiative,
    },
    PhaseDefinition {
        name: "Optimization & Innovation",
        timeline: "Months 24-36",
        description: "Advanced capabilities, AI/ML, and continuous improvement",
        accepts: long_term,
    },
];

/// Schedule the detected gaps of an analysis into roadmap phases.
///
/// Each gap appears in at most one phase: the first whose criteria it meets.
/// A phase's cost and band counts cover every gap meeting its criteria,
/// including gaps already scheduled earlier. Phases left without gaps are
/// omitted.
#[must_use]
pub fn roadmap_phases(analysis: &GapAnalysisResult) -> Vec<RoadmapPhase> {
    let mut scheduled: HashSet<String> = HashSet::new();
    let mut phases = Vec::new();

    for (number, definition) in (1u8..).zip(PHASES.iter()) {
        let accepted: Vec<&DetectedGap> = analysis
            .gaps
            .iter()
            .filter(|g| (definition.accepts)(&g.rule))
            .collect();
        let gaps: Vec<DetectedGap> = accepted
            .iter()
            .filter(|g| scheduled.insert(g.rule.id.clone()))
            .map(|g| (*g).clone())
            .collect();
        if gaps.is_empty() {
            continue;
        }

        let band_count =
            |band: PriorityBand| accepted.iter().filter(|g| g.priority_band() == band).count();
        let cost = estimated_cost_usd(accepted.iter().copied());
        phases.push(RoadmapPhase {
            number,
            name: format!("Phase {number}: {}", definition.name),
            timeline: definition.timeline.to_string(),
            description: definition.description.to_string(),
            gaps,
            estimated_cost: format_currency(cost),
            estimated_cost_usd: cost,
            critical_count: band_count(PriorityBand::Critical),
            high_count: band_count(PriorityBand::High),
        });
    }

    tracing::debug!(
        phases = phases.len(),
        scheduled = scheduled.len(),
        unscheduled = analysis.total_gaps - scheduled.len(),
        "Built roadmap"
    );
    phases
}
