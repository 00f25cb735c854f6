//! Weighted maturity calculator.
//!
//! Component score is the weighted mean of the scores of every answered
//! question that affects it. Layer score is the plain mean of its assessed
//! (rounded) component scores, and the overall score is the plain mean of
//! the assessed (rounded) layer scores. Levels are taken from the unrounded
//! means.

use crate::model::{
    AssessmentAnswers, Component, Layer, MaturityLevel, Question, Taxonomy, NOT_ASSESSED_COLOR,
    NOT_ASSESSED_LABEL,
};
use crate::utils::{percentage, round1};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maturity of a single assessed component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMaturity {
    pub component_id: String,
    pub component_name: String,
    pub layer_id: u8,
    /// Weighted mean score, one decimal
    pub maturity_score: f64,
    pub maturity_level: MaturityLevel,
    pub maturity_label: String,
    /// Number of answered questions that contributed evidence
    pub contributing_questions: usize,
    /// Sum of contributing question weights
    pub total_weight: f64,
    pub color: String,
}

/// Maturity of a layer with at least one assessed component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerMaturity {
    pub layer_id: u8,
    pub layer_name: String,
    /// Mean of assessed component scores, one decimal
    pub maturity_score: f64,
    pub maturity_level: MaturityLevel,
    pub maturity_label: String,
    pub color: String,
    /// Assessed components in taxonomy order
    pub components: Vec<ComponentMaturity>,
    /// Components the layer has in the taxonomy, assessed or not
    pub total_components: usize,
}

/// Result of a maturity calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturitySummary {
    /// Mean of assessed layer scores, one decimal (0 when nothing is assessed)
    pub overall_maturity_score: f64,
    /// `None` when nothing is assessed
    pub overall_maturity_level: Option<MaturityLevel>,
    pub overall_maturity_label: String,
    pub overall_color: String,
    /// Assessed layers in taxonomy order
    pub layers: Vec<LayerMaturity>,
    pub questions_answered: usize,
    pub total_questions: usize,
    /// Whole percentage of questions answered
    pub completion_percentage: u32,
}

impl MaturitySummary {
    /// Whether any component received evidence
    #[must_use]
    pub fn is_assessed(&self) -> bool {
        !self.layers.is_empty()
    }

    /// Look up an assessed layer
    #[must_use]
    pub fn layer(&self, layer_id: u8) -> Option<&LayerMaturity> {
        self.layers.iter().find(|l| l.layer_id == layer_id)
    }

    /// Look up an assessed component
    #[must_use]
    pub fn component(&self, component_id: &str) -> Option<&ComponentMaturity> {
        self.components().find(|c| c.component_id == component_id)
    }

    /// All assessed components in taxonomy order
    pub fn components(&self) -> impl Iterator<Item = &ComponentMaturity> {
        self.layers.iter().flat_map(|l| l.components.iter())
    }

    /// Number of assessed components
    #[must_use]
    pub fn assessed_component_count(&self) -> usize {
        self.layers.iter().map(|l| l.components.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    weighted_score: f64,
    weight: f64,
    questions: usize,
}

impl ComponentMaturity {
    fn from_accumulator(component: &Component, layer_id: u8, acc: Accumulator) -> Option<Self> {
        if acc.weight <= 0.0 {
            return None;
        }
        let score = acc.weighted_score / acc.weight;
        let level = MaturityLevel::from_score(score);
        Some(Self {
            component_id: component.id.clone(),
            component_name: component.name.clone(),
            layer_id,
            maturity_score: round1(score),
            maturity_level: level,
            maturity_label: level.label().to_string(),
            contributing_questions: acc.questions,
            total_weight: acc.weight,
            color: level.color().to_string(),
        })
    }
}

impl LayerMaturity {
    fn from_components(layer: &Layer, components: Vec<ComponentMaturity>) -> Option<Self> {
        if components.is_empty() {
            return None;
        }
        let score =
            components.iter().map(|c| c.maturity_score).sum::<f64>() / components.len() as f64;
        let level = MaturityLevel::from_score(score);
        Some(Self {
            layer_id: layer.id,
            layer_name: layer.name.clone(),
            maturity_score: round1(score),
            maturity_level: level,
            maturity_label: level.label().to_string(),
            color: level.color().to_string(),
            components,
            total_components: layer.components.len(),
        })
    }
}

/// Maturity scoring engine bound to a taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct MaturityCalculator<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> MaturityCalculator<'a> {
    /// Create a calculator for a taxonomy
    #[must_use]
    pub const fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Calculate maturity for an answer-set.
    ///
    /// Never fails: labels that match no answer and component IDs missing
    /// from the taxonomy contribute nothing.
    #[must_use]
    pub fn calculate(&self, answers: &AssessmentAnswers, questions: &[Question]) -> MaturitySummary {
        let mut index: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut accumulators: Vec<Vec<Accumulator>> = Vec::with_capacity(self.taxonomy.layers.len());
        for (li, layer) in self.taxonomy.layers.iter().enumerate() {
            for (ci, component) in layer.components.iter().enumerate() {
                index.entry(component.id.as_str()).or_insert((li, ci));
            }
            accumulators.push(vec![Accumulator::default(); layer.components.len()]);
        }

        let mut questions_answered = 0;
        for question in questions {
            let Some(label) = answers.selected(&question.id) else {
                continue;
            };
            questions_answered += 1;

            let Some(answer) = question.resolve_answer(label) else {
                tracing::debug!(question_id = %question.id, label, "Selected label matches no answer");
                continue;
            };
            let weight = question.effective_weight();
            let score = answer.score.as_score();

            for component_id in &question.affects_components {
                match index.get(component_id.as_str()) {
                    Some(&(li, ci)) => {
                        let acc = &mut accumulators[li][ci];
                        acc.weighted_score += score * weight;
                        acc.weight += weight;
                        acc.questions += 1;
                    }
                    None => {
                        tracing::debug!(
                            question_id = %question.id,
                            component_id = %component_id,
                            "Question affects unknown component"
                        );
                    }
                }
            }
        }

        let layers: Vec<LayerMaturity> = self
            .taxonomy
            .layers
            .iter()
            .zip(accumulators)
            .filter_map(|(layer, accs)| {
                let components = layer
                    .components
                    .iter()
                    .zip(accs)
                    .filter_map(|(component, acc)| {
                        ComponentMaturity::from_accumulator(component, layer.id, acc)
                    })
                    .collect();
                LayerMaturity::from_components(layer, components)
            })
            .collect();

        let overall_level;
        let overall_score;
        if layers.is_empty() {
            overall_level = None;
            overall_score = 0.0;
        } else {
            let mean = layers.iter().map(|l| l.maturity_score).sum::<f64>() / layers.len() as f64;
            overall_level = Some(MaturityLevel::from_score(mean));
            overall_score = round1(mean);
        }

        tracing::debug!(
            questions_answered,
            total_questions = questions.len(),
            assessed_layers = layers.len(),
            overall_score,
            "Calculated maturity"
        );

        MaturitySummary {
            overall_maturity_score: overall_score,
            overall_maturity_level: overall_level,
            overall_maturity_label: overall_level
                .map_or(NOT_ASSESSED_LABEL, MaturityLevel::label)
                .to_string(),
            overall_color: overall_level
                .map_or(NOT_ASSESSED_COLOR, MaturityLevel::color)
                .to_string(),
            layers,
            questions_answered,
            total_questions: questions.len(),
            completion_percentage: percentage(questions_answered, questions.len()),
        }
    }
}

/// Calculate maturity for an answer-set against a taxonomy.
#[must_use]
pub fn calculate_maturity(
    answers: &AssessmentAnswers,
    questions: &[Question],
    taxonomy: &Taxonomy,
) -> MaturitySummary {
    MaturityCalculator::new(taxonomy).calculate(answers, questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, QuestionCategory};

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            Layer::new(
                0,
                "Strategy",
                vec![Component::new("0.1", "Goals"), Component::new("0.2", "Roadmap")],
            ),
            Layer::new(
                3,
                "Data",
                vec![
                    Component::new("3.1", "Governance"),
                    Component::new("3.4", "Quality"),
                ],
            ),
        ])
    }

    fn question(id: &str, components: &[&str], weight: f64) -> Question {
        let mut q = Question::new(id, QuestionCategory::DataAndAnalytics, "?")
            .affecting(components.iter().copied())
            .with_weight(weight);
        for level in MaturityLevel::ALL {
            q = q.with_answer(Answer::new(format!("L{}", level.value()), level));
        }
        q
    }

    #[test]
    fn test_empty_answers_not_assessed() {
        let questions = vec![question("Q1", &["0.1"], 1.0)];
        let summary = calculate_maturity(&AssessmentAnswers::new(), &questions, &taxonomy());
        assert_eq!(summary.overall_maturity_score, 0.0);
        assert_eq!(summary.overall_maturity_level, None);
        assert_eq!(summary.overall_maturity_label, NOT_ASSESSED_LABEL);
        assert_eq!(summary.overall_color, NOT_ASSESSED_COLOR);
        assert!(summary.layers.is_empty());
        assert_eq!(summary.completion_percentage, 0);
    }

    #[test]
    fn test_weighted_component_mean() {
        let questions = vec![question("Q1", &["3.4"], 1.0), question("Q2", &["3.4"], 3.0)];
        let answers: AssessmentAnswers = [("Q1", "L1"), ("Q2", "L5")].into_iter().collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy());

        let c = summary.component("3.4").unwrap();
        assert_eq!(c.maturity_score, 4.0);
        assert_eq!(c.maturity_level, MaturityLevel::Managed);
        assert_eq!(c.contributing_questions, 2);
        assert_eq!(c.total_weight, 4.0);
        assert_eq!(summary.layer(3).unwrap().total_components, 2);
    }

    #[test]
    fn test_layer_is_plain_mean_of_components() {
        let questions = vec![question("Q1", &["3.1"], 1.0), question("Q2", &["3.4"], 5.0)];
        let answers: AssessmentAnswers = [("Q1", "L2"), ("Q2", "L4")].into_iter().collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy());
        assert_eq!(summary.layer(3).unwrap().maturity_score, 3.0);
        assert_eq!(summary.overall_maturity_score, 3.0);
    }

    #[test]
    fn test_overall_weights_layers_equally() {
        let questions = vec![
            question("Q1", &["0.1"], 1.0),
            question("Q2", &["3.1", "3.4"], 1.0),
        ];
        let answers: AssessmentAnswers = [("Q1", "L1"), ("Q2", "L4")].into_iter().collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy());
        assert_eq!(summary.layers.len(), 2);
        assert_eq!(summary.overall_maturity_score, 2.5);
        assert_eq!(summary.overall_maturity_level, Some(MaturityLevel::Defined));
    }

    #[test]
    fn test_unassessed_components_excluded() {
        let questions = vec![question("Q1", &["3.4"], 1.0)];
        let answers: AssessmentAnswers = [("Q1", "L3")].into_iter().collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy());
        assert!(summary.layer(0).is_none());
        assert!(summary.component("3.1").is_none());
        assert_eq!(summary.assessed_component_count(), 1);
    }

    #[test]
    fn test_stale_label_counts_as_answered_only() {
        let questions = vec![question("Q1", &["3.4"], 1.0), question("Q2", &["0.1"], 1.0)];
        let answers: AssessmentAnswers = [("Q1", "Retired option")].into_iter().collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy());
        assert_eq!(summary.questions_answered, 1);
        assert_eq!(summary.completion_percentage, 50);
        assert!(!summary.is_assessed());
    }

    #[test]
    fn test_unknown_component_skipped() {
        let questions = vec![question("Q1", &["9.99", "0.2"], 1.0)];
        let answers: AssessmentAnswers = [("Q1", "L5")].into_iter().collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy());
        assert_eq!(summary.assessed_component_count(), 1);
        assert_eq!(summary.overall_maturity_score, 5.0);
    }

    #[test]
    fn test_level_uses_unrounded_score() {
        // weights 1 and 3 at scores 2 and 3 give 2.75; rounds to 2.8
        let questions = vec![question("Q1", &["0.1"], 1.0), question("Q2", &["0.1"], 3.0)];
        let answers: AssessmentAnswers = [("Q1", "L2"), ("Q2", "L3")].into_iter().collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy());
        let c = summary.component("0.1").unwrap();
        assert_eq!(c.maturity_score, 2.8);
        assert_eq!(c.maturity_level, MaturityLevel::Defined);
    }

    #[test]
    fn test_empty_bank_completion_is_zero() {
        let summary = calculate_maturity(&AssessmentAnswers::new(), &[], &taxonomy());
        assert_eq!(summary.total_questions, 0);
        assert_eq!(summary.completion_percentage, 0);
    }
}
