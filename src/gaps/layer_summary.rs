//! Per-layer gap rollups.

use super::cost::{estimated_cost_usd, format_currency};
use super::{DetectedGap, GapAnalysisResult};
use crate::model::{PriorityBand, Taxonomy};
use crate::utils::round1;
use serde::Serialize;

/// Gap statistics for one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerGapSummary {
    pub layer_id: u8,
    pub layer_name: String,
    pub total_gaps: usize,
    pub critical_gaps: usize,
    /// Mean priority score, one decimal
    pub average_priority: f64,
    /// Highest-priority gap in the layer
    pub top_gap: DetectedGap,
    pub estimated_cost: String,
    pub estimated_cost_usd: f64,
}

/// Summarize every layer that has detected gaps.
///
/// Ordered by critical gap count descending; layers with equal counts keep
/// ascending layer order. Layers missing from the taxonomy are named
/// `Layer {id}`.
#[must_use]
pub fn layer_gap_summaries(analysis: &GapAnalysisResult, taxonomy: &Taxonomy) -> Vec<LayerGapSummary> {
    let mut summaries: Vec<LayerGapSummary> = analysis
        .gaps_by_layer
        .iter()
        .filter_map(|(&layer_id, gaps)| {
            let top_gap = gaps.first()?.clone();
            let average = gaps.iter().map(DetectedGap::priority_score).sum::<f64>() / gaps.len() as f64;
            let cost = estimated_cost_usd(gaps);
            Some(LayerGapSummary {
                layer_id,
                layer_name: taxonomy.layer_name(layer_id),
                total_gaps: gaps.len(),
                critical_gaps: gaps
                    .iter()
                    .filter(|g| g.priority_band() == PriorityBand::Critical)
                    .count(),
                average_priority: round1(average),
                top_gap,
                estimated_cost: format_currency(cost),
                estimated_cost_usd: cost,
            })
        })
        .collect();
    summaries.sort_by(|a, b| b.critical_gaps.cmp(&a.critical_gaps));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaps::detect_gaps;
    use crate::model::{
        Answer, AssessmentAnswers, Component, CostBand, GapCatalog, GapRule, Layer,
        MaturityLevel, Question, QuestionCategory, Rating, Recommendation,
    };

    fn rule(id: &str, layer: u8, risk: u8, impact: u8, cost: u8) -> GapRule {
        GapRule {
            id: id.to_string(),
            description: String::new(),
            layer,
            component_id: format!("{layer}.1"),
            component_name: None,
            risk: Rating::new(risk).unwrap(),
            business_impact: Rating::new(impact).unwrap(),
            remediation_cost: CostBand::try_from(cost).unwrap(),
            recommendation: Recommendation::default(),
        }
    }

    #[test]
    fn test_summaries_sorted_by_critical_count() {
        let catalog = GapCatalog::from_rules(vec![
            rule("G1", 1, 3, 3, 3),
            rule("G2", 4, 5, 5, 2),
            rule("G3", 4, 2, 2, 1),
            rule("G4", 7, 3, 3, 3),
        ]);
        let taxonomy = Taxonomy::new(vec![
            Layer::new(1, "Business", vec![Component::new("1.1", "Capabilities")]),
            Layer::new(4, "Integration", vec![Component::new("4.1", "APIs")]),
        ]);
        let questions = vec![Question::new("Q1", QuestionCategory::Integration, "?").with_answer(
            Answer::new("Bad", MaturityLevel::Initial).triggers(["G1", "G2", "G3", "G4"]),
        )];
        let answers: AssessmentAnswers = [("Q1", "Bad")].into_iter().collect();
        let analysis = detect_gaps(&answers, &questions, &catalog);

        let summaries = layer_gap_summaries(&analysis, &taxonomy);
        let order: Vec<u8> = summaries.iter().map(|s| s.layer_id).collect();
        assert_eq!(order, [4, 1, 7]);

        let integration = &summaries[0];
        assert_eq!(integration.layer_name, "Integration");
        assert_eq!(integration.total_gaps, 2);
        assert_eq!(integration.critical_gaps, 1);
        assert_eq!(integration.average_priority, 8.3);
        assert_eq!(integration.top_gap.rule.id, "G2");
        assert_eq!(integration.estimated_cost, "$400K");
        assert_eq!(summaries[2].layer_name, "Layer 7");
    }
}
