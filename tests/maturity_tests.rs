//! Maturity calculator integration tests.
//!
//! Scores hand-built question banks against the bundled taxonomy and checks
//! component, layer and overall aggregation.

use ea_assess::maturity::{calculate_maturity, compare_maturity, maturity_insights};
use ea_assess::model::{
    Answer, AssessmentAnswers, Component, Layer, MaturityLevel, Question, QuestionCategory,
    Taxonomy,
};

fn question(id: &str, components: &[&str]) -> Question {
    Question::new(id, QuestionCategory::ApplicationsAndSystems, "How mature?")
        .affecting(components.iter().copied())
        .with_answer(Answer::new("Ad hoc", MaturityLevel::Initial))
        .with_answer(Answer::new("Emerging", MaturityLevel::Developing))
        .with_answer(Answer::new("Standard", MaturityLevel::Defined))
        .with_answer(Answer::new("Measured", MaturityLevel::Managed))
        .with_answer(Answer::new("Leading", MaturityLevel::Optimized))
}

fn answers(pairs: &[(&str, &str)]) -> AssessmentAnswers {
    pairs.iter().copied().collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn empty_answers_score_nothing() {
    let taxonomy = Taxonomy::standard().unwrap();
    let questions = vec![question("Q1.1", &["3.4"])];

    let summary = calculate_maturity(&AssessmentAnswers::new(), &questions, &taxonomy);

    assert_eq!(summary.overall_maturity_score, 0.0);
    assert!(summary.layers.is_empty());
    assert_eq!(summary.completion_percentage, 0);
    assert_eq!(summary.overall_maturity_level, None);
}

#[test]
fn single_optimized_answer_propagates_to_overall() {
    let taxonomy = Taxonomy::standard().unwrap();
    let questions = vec![question("Q1.1", &["3.4"])];

    let summary = calculate_maturity(&answers(&[("Q1.1", "Leading")]), &questions, &taxonomy);

    let component = summary.component("3.4").unwrap();
    assert_eq!(component.maturity_score, 5.0);
    assert_eq!(component.contributing_questions, 1);

    assert_eq!(summary.layers.len(), 1);
    assert_eq!(summary.layers[0].layer_id, 3);
    assert_eq!(summary.layers[0].maturity_score, 5.0);
    assert_eq!(summary.overall_maturity_score, 5.0);
    assert_eq!(summary.overall_maturity_level, Some(MaturityLevel::Optimized));
    assert_eq!(summary.completion_percentage, 100);
}

#[test]
fn layer_is_mean_of_assessed_components() {
    let taxonomy = Taxonomy::new(vec![Layer::new(
        1,
        "Business",
        vec![
            Component::new("1.1", "Capabilities"),
            Component::new("1.2", "Processes"),
            Component::new("1.3", "Organization"),
        ],
    )]);
    let questions = vec![question("Q1", &["1.1"]), question("Q2", &["1.2"])];

    let summary = calculate_maturity(
        &answers(&[("Q1", "Emerging"), ("Q2", "Measured")]),
        &questions,
        &taxonomy,
    );

    let layer = summary.layer(1).unwrap();
    assert_eq!(layer.maturity_score, 3.0);
    assert_eq!(layer.components.len(), 2);
    assert_eq!(layer.total_components, 3);
    assert!(summary.component("1.3").is_none());
}

#[test]
fn component_score_is_weighted() {
    let taxonomy = Taxonomy::standard().unwrap();
    let questions = vec![
        question("Q1", &["3.4"]).with_weight(3.0),
        question("Q2", &["3.4"]),
    ];

    // (5 * 3 + 1 * 1) / 4 = 4.0
    let summary = calculate_maturity(
        &answers(&[("Q1", "Leading"), ("Q2", "Ad hoc")]),
        &questions,
        &taxonomy,
    );
    let component = summary.component("3.4").unwrap();
    assert_eq!(component.maturity_score, 4.0);
    assert_eq!(component.total_weight, 4.0);
    assert_eq!(component.contributing_questions, 2);
}

#[test]
fn unknown_components_and_stale_labels_are_skipped() {
    let taxonomy = Taxonomy::standard().unwrap();
    let questions = vec![
        question("Q1", &["99.1", "3.4"]),
        question("Q2", &["3.5"]),
    ];

    let summary = calculate_maturity(
        &answers(&[("Q1", "Standard"), ("Q2", "No longer an option"), ("Q9", "Leading")]),
        &questions,
        &taxonomy,
    );

    assert_eq!(summary.assessed_component_count(), 1);
    assert!(summary.component("3.5").is_none());
    assert_eq!(summary.component("3.4").unwrap().maturity_score, 3.0);
}

#[test]
fn overall_is_mean_of_assessed_layers() {
    let taxonomy = Taxonomy::standard().unwrap();
    let questions = vec![question("Q1", &["3.4"]), question("Q2", &["6.2"])];

    let summary = calculate_maturity(
        &answers(&[("Q1", "Leading"), ("Q2", "Emerging")]),
        &questions,
        &taxonomy,
    );

    assert_eq!(summary.layers.len(), 2);
    assert_eq!(summary.overall_maturity_score, 3.5);
    assert_eq!(summary.overall_maturity_level, Some(MaturityLevel::Managed));
}

// ============================================================================
// Insights and comparison
// ============================================================================

#[test]
fn insights_and_comparison_follow_scores() {
    let taxonomy = Taxonomy::standard().unwrap();
    let questions = vec![question("Q1", &["3.4"]), question("Q2", &["6.2"])];

    let before = calculate_maturity(
        &answers(&[("Q1", "Ad hoc"), ("Q2", "Measured")]),
        &questions,
        &taxonomy,
    );
    let after = calculate_maturity(
        &answers(&[("Q1", "Standard"), ("Q2", "Measured")]),
        &questions,
        &taxonomy,
    );

    assert!(!maturity_insights(&before).is_empty());

    let comparison = compare_maturity(&before, &after);
    assert_eq!(comparison.len(), 2);
    assert_eq!(comparison[0].layer_id, 3);
    assert_eq!(comparison[0].improvement, 2.0);
    assert_eq!(comparison[0].percentage_change, 200);
    assert_eq!(comparison[1].layer_id, 6);
    assert_eq!(comparison[1].improvement, 0.0);
}
