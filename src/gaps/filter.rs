//! Gap filtering.

use super::{DetectedGap, GapAnalysisResult};
use crate::model::{CostBand, GapRule, PriorityBand};
use serde::{Deserialize, Serialize};

/// Criteria for narrowing a gap list. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapFilter {
    /// Keep only these bands
    pub bands: Vec<PriorityBand>,
    /// Keep only these layers
    pub layers: Vec<u8>,
    /// Keep only gaps at or below this cost band
    pub max_cost: Option<CostBand>,
    pub quick_wins_only: bool,
}

impl GapFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bands(mut self, bands: impl IntoIterator<Item = PriorityBand>) -> Self {
        self.bands = bands.into_iter().collect();
        self
    }

    #[must_use]
    pub fn layers(mut self, layers: impl IntoIterator<Item = u8>) -> Self {
        self.layers = layers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn max_cost(mut self, band: CostBand) -> Self {
        self.max_cost = Some(band);
        self
    }

    #[must_use]
    pub fn quick_wins_only(mut self) -> Self {
        self.quick_wins_only = true;
        self
    }

    /// Whether a rule passes every criterion
    #[must_use]
    pub fn matches(&self, rule: &GapRule) -> bool {
        (self.bands.is_empty() || self.bands.contains(&rule.priority_band()))
            && (self.layers.is_empty() || self.layers.contains(&rule.layer))
            && self.max_cost.map_or(true, |max| rule.remediation_cost <= max)
            && (!self.quick_wins_only || rule.is_quick_win())
    }
}

/// Gaps of an analysis that pass a filter, in priority order.
#[must_use]
pub fn filter_gaps<'a>(analysis: &'a GapAnalysisResult, filter: &GapFilter) -> Vec<&'a DetectedGap> {
    analysis
        .gaps
        .iter()
        .filter(|g| filter.matches(&g.rule))
        .collect()
}
