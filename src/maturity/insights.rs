//! Narrative insights and before/after comparison over maturity summaries.

use super::MaturitySummary;
use crate::utils::round1;
use serde::{Deserialize, Serialize};

/// Tone of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Strength,
    Concern,
    Critical,
}

/// Headline observation about a maturity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityInsight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    /// Layer names the insight is about
    pub components: Vec<String>,
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Derive strengths, concerns and critical layers from a summary.
///
/// Strong layers score 4.0 or more, layers needing improvement score in
/// `[2.0, 3.0)`, critical layers score below 2.0. An incomplete assessment
/// adds a trailing concern. Layers in `[3.0, 4.0)` are not called out.
#[must_use]
pub fn maturity_insights(summary: &MaturitySummary) -> Vec<MaturityInsight> {
    let mut insights = Vec::new();

    let names = |pred: &dyn Fn(f64) -> bool| -> Vec<String> {
        summary
            .layers
            .iter()
            .filter(|l| pred(l.maturity_score))
            .map(|l| l.layer_name.clone())
            .collect()
    };

    let strengths = names(&|s| s >= 4.0);
    if !strengths.is_empty() {
        let n = strengths.len();
        insights.push(MaturityInsight {
            kind: InsightKind::Strength,
            title: format!("{n} Strong Layer{}", plural(n, "", "s")),
            description: format!(
                "{} {} performing well with maturity scores of 4.0+",
                strengths.join(", "),
                plural(n, "is", "are")
            ),
            components: strengths,
        });
    }

    let concerns = names(&|s| (2.0..3.0).contains(&s));
    if !concerns.is_empty() {
        let n = concerns.len();
        insights.push(MaturityInsight {
            kind: InsightKind::Concern,
            title: format!(
                "{n} Layer{} Need{} Improvement",
                plural(n, "", "s"),
                plural(n, "s", "")
            ),
            description: format!(
                "{} {} significant gaps that should be addressed",
                concerns.join(", "),
                plural(n, "has", "have")
            ),
            components: concerns,
        });
    }

    let critical = names(&|s| s < 2.0);
    if !critical.is_empty() {
        let n = critical.len();
        insights.push(MaturityInsight {
            kind: InsightKind::Critical,
            title: format!("{n} Critical Layer{}", plural(n, "", "s")),
            description: format!(
                "{} {} immediate attention with maturity below 2.0",
                critical.join(", "),
                plural(n, "requires", "require")
            ),
            components: critical,
        });
    }

    if summary.completion_percentage < 100 {
        insights.push(MaturityInsight {
            kind: InsightKind::Concern,
            title: "Assessment Incomplete".to_string(),
            description: format!(
                "Only {}% of questions answered. Complete the assessment for accurate maturity scoring.",
                summary.completion_percentage
            ),
            components: Vec::new(),
        });
    }

    insights
}

/// Score movement of one layer between two assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityComparison {
    pub layer_id: u8,
    pub layer_name: String,
    pub before_score: f64,
    pub after_score: f64,
    /// `after - before`, one decimal
    pub improvement: f64,
    /// Relative change against `before`, whole percent
    pub percentage_change: i64,
}

/// Compare every layer assessed in `before` against `after`.
///
/// A layer missing from `after` is treated as unchanged.
#[must_use]
pub fn compare_maturity(before: &MaturitySummary, after: &MaturitySummary) -> Vec<MaturityComparison> {
    before
        .layers
        .iter()
        .map(|b| {
            let after_score = after
                .layer(b.layer_id)
                .map_or(b.maturity_score, |a| a.maturity_score);
            let improvement = after_score - b.maturity_score;
            let percentage_change = if b.maturity_score > 0.0 {
                (improvement / b.maturity_score * 100.0).round() as i64
            } else {
                0
            };
            MaturityComparison {
                layer_id: b.layer_id,
                layer_name: b.layer_name.clone(),
                before_score: b.maturity_score,
                after_score,
                improvement: round1(improvement),
                percentage_change,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maturity::calculate_maturity;
    use crate::model::{
        Answer, AssessmentAnswers, Component, Layer, MaturityLevel, Question, QuestionCategory,
        Taxonomy,
    };

    fn fixture() -> (Taxonomy, Vec<Question>) {
        let taxonomy = Taxonomy::new(vec![
            Layer::new(0, "Strategy", vec![Component::new("0.1", "Goals")]),
            Layer::new(1, "Business", vec![Component::new("1.1", "Capabilities")]),
            Layer::new(2, "Applications", vec![Component::new("2.1", "Portfolio")]),
        ]);
        let questions = ["0.1", "1.1", "2.1"]
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let mut q = Question::new(format!("Q{i}"), QuestionCategory::StrategicDrivers, "?")
                    .affecting([*c]);
                for level in MaturityLevel::ALL {
                    q = q.with_answer(Answer::new(level.name(), level));
                }
                q
            })
            .collect();
        (taxonomy, questions)
    }

    #[test]
    fn test_insight_categories() {
        let (taxonomy, questions) = fixture();
        let answers: AssessmentAnswers = [("Q0", "Optimized"), ("Q1", "Developing"), ("Q2", "Initial")]
            .into_iter()
            .collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy);
        let insights = maturity_insights(&summary);

        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            ["1 Strong Layer", "1 Layer Needs Improvement", "1 Critical Layer"]
        );
        assert_eq!(insights[0].components, ["Strategy"]);
        assert_eq!(
            insights[2].description,
            "Applications requires immediate attention with maturity below 2.0"
        );
    }

    #[test]
    fn test_incomplete_assessment_flagged() {
        let (taxonomy, questions) = fixture();
        let answers: AssessmentAnswers = [("Q0", "Managed"), ("Q1", "Managed")].into_iter().collect();
        let summary = calculate_maturity(&answers, &questions, &taxonomy);
        let insights = maturity_insights(&summary);

        assert_eq!(insights[0].title, "2 Strong Layers");
        assert_eq!(insights[0].description, "Strategy, Business are performing well with maturity scores of 4.0+");
        let last = insights.last().unwrap();
        assert_eq!(last.kind, InsightKind::Concern);
        assert_eq!(last.title, "Assessment Incomplete");
        assert!(last.description.starts_with("Only 67% of questions answered."));
    }

    #[test]
    fn test_compare_maturity() {
        let (taxonomy, questions) = fixture();
        let before: AssessmentAnswers = [("Q0", "Developing"), ("Q1", "Defined")].into_iter().collect();
        let after: AssessmentAnswers = [("Q0", "Managed")].into_iter().collect();
        let before = calculate_maturity(&before, &questions, &taxonomy);
        let after = calculate_maturity(&after, &questions, &taxonomy);

        let cmp = compare_maturity(&before, &after);
        assert_eq!(cmp.len(), 2);
        assert_eq!(cmp[0].improvement, 2.0);
        assert_eq!(cmp[0].percentage_change, 100);
        assert_eq!(cmp[1].after_score, 3.0);
        assert_eq!(cmp[1].improvement, 0.0);
    }
}
