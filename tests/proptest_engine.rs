//! Property-based tests for the scoring engine.
//!
//! Answer-sets are drawn from the bundled question bank so that every
//! selected label resolves, then checked for idempotence, monotonic gap
//! growth and the priority formula.

use ea_assess::model::{priority_score_of, AssessmentAnswers, CostBand, PriorityBand, Rating};
use ea_assess::{evaluate, ReferenceData};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static REFERENCE: LazyLock<ReferenceData> =
    LazyLock::new(|| ReferenceData::standard().expect("bundled reference data"));

/// Build an answer-set from `(question index, answer index)` picks.
fn answers_from(picks: &[(usize, usize)]) -> AssessmentAnswers {
    let questions = &REFERENCE.questions;
    let mut answers = AssessmentAnswers::new();
    for &(qi, ai) in picks {
        let question = &questions[qi % questions.len()];
        let answer = &question.answers[ai % question.answers.len()];
        answers.answer(question.id.as_str(), answer.label.as_str());
    }
    answers
}

fn gap_ids(answers: &AssessmentAnswers) -> BTreeSet<String> {
    evaluate(answers, &REFERENCE)
        .gaps
        .gaps
        .into_iter()
        .map(|g| g.rule.id)
        .collect()
}

fn picks() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..1000, 0usize..10), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn evaluation_is_idempotent(picks in picks()) {
        let answers = answers_from(&picks);
        let first = evaluate(&answers, &REFERENCE);
        let second = evaluate(&answers, &REFERENCE);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn answering_more_questions_never_removes_gaps(
        base in picks(),
        extra in picks(),
    ) {
        let before = answers_from(&base);
        let mut after = before.clone();
        // Only add answers for questions not answered yet
        for (question, label) in answers_from(&extra).iter() {
            if !before.contains(question) {
                after.answer(question, label);
            }
        }

        let before_ids = gap_ids(&before);
        let after_ids = gap_ids(&after);
        prop_assert!(before_ids.is_subset(&after_ids), "{:?} not in {:?}", before_ids, after_ids);
    }

    #[test]
    fn scores_stay_in_domain(picks in picks()) {
        let results = evaluate(&answers_from(&picks), &REFERENCE);
        let maturity = &results.maturity;
        prop_assert!((0.0..=5.0).contains(&maturity.overall_maturity_score));
        prop_assert!(maturity.completion_percentage <= 100);
        for layer in &maturity.layers {
            prop_assert!((1.0..=5.0).contains(&layer.maturity_score));
            prop_assert!(!layer.components.is_empty());
        }
        prop_assert_eq!(
            results.gaps.total_gaps,
            results.gaps.critical_gaps + results.gaps.high_gaps
                + results.gaps.medium_gaps + results.gaps.low_gaps
        );
        prop_assert!(results.recommendations.len() <= 10);
    }

    #[test]
    fn gaps_are_sorted_by_priority(picks in picks()) {
        let results = evaluate(&answers_from(&picks), &REFERENCE);
        let scores: Vec<f64> = results.gaps.gaps.iter().map(|g| g.priority_score()).collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{:?}", scores);
    }

    #[test]
    fn priority_formula_and_band(risk in 1u8..=5, impact in 1u8..=5, cost in 1u8..=5) {
        let score = priority_score_of(
            Rating::new(risk).unwrap(),
            Rating::new(impact).unwrap(),
            CostBand::try_from(cost).unwrap(),
        );
        prop_assert_eq!(score, f64::from(risk) * f64::from(impact) / f64::from(cost));

        let expected = if score >= 8.0 {
            PriorityBand::Critical
        } else if score >= 5.0 {
            PriorityBand::High
        } else if score >= 3.0 {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        };
        prop_assert_eq!(PriorityBand::from_score(score), expected);
    }
}
