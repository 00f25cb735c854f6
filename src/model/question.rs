//! Question bank records.

use super::{AssessmentAnswers, MaturityLevel};
use serde::{Deserialize, Serialize};

/// Weight used when a question carries none (or a non-positive one).
pub const DEFAULT_QUESTION_WEIGHT: f64 = 1.0;

fn default_weight() -> f64 {
    DEFAULT_QUESTION_WEIGHT
}

/// Questionnaire section a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionCategory {
    #[serde(rename = "Company Profile")]
    CompanyProfile,
    #[serde(rename = "Strategic Drivers")]
    StrategicDrivers,
    #[serde(rename = "Applications & Systems")]
    ApplicationsAndSystems,
    #[serde(rename = "Data & Analytics")]
    DataAndAnalytics,
    #[serde(rename = "Integration")]
    Integration,
    #[serde(rename = "Infrastructure & Cloud")]
    InfrastructureAndCloud,
    #[serde(rename = "Security & Compliance")]
    SecurityAndCompliance,
    #[serde(rename = "DevOps & Delivery")]
    DevOpsAndDelivery,
    #[serde(rename = "Pain Points")]
    PainPoints,
}

impl QuestionCategory {
    /// Display name, identical to the serialized form
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CompanyProfile => "Company Profile",
            Self::StrategicDrivers => "Strategic Drivers",
            Self::ApplicationsAndSystems => "Applications & Systems",
            Self::DataAndAnalytics => "Data & Analytics",
            Self::Integration => "Integration",
            Self::InfrastructureAndCloud => "Infrastructure & Cloud",
            Self::SecurityAndCompliance => "Security & Compliance",
            Self::DevOpsAndDelivery => "DevOps & Delivery",
            Self::PainPoints => "Pain Points",
        }
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Label, unique within its question; answer-sets refer to it verbatim
    pub label: String,
    /// Maturity evidence carried by this option
    pub score: MaturityLevel,
    /// Gap IDs raised when this option is selected
    #[serde(
        default,
        alias = "triggersGaps",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub triggers_gaps: Vec<String>,
}

impl Answer {
    /// Create an answer with no gap triggers
    pub fn new(label: impl Into<String>, score: MaturityLevel) -> Self {
        Self {
            label: label.into(),
            score,
            triggers_gaps: Vec::new(),
        }
    }

    /// Set the gap IDs this answer triggers
    #[must_use]
    pub fn triggers<I, S>(mut self, gap_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers_gaps = gap_ids.into_iter().map(Into::into).collect();
        self
    }
}

/// A questionnaire item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique ID ("Q1.1", "Q2.3", ...)
    pub id: String,
    pub category: QuestionCategory,
    pub text: String,
    /// Selectable options in display order
    #[serde(default)]
    pub answers: Vec<Answer>,
    /// Component IDs this question provides maturity evidence for
    #[serde(default, alias = "affectsComponents")]
    pub affects_components: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, alias = "isRequired")]
    pub is_required: bool,
}

impl Question {
    /// Create a question with default weight and no answers
    pub fn new(
        id: impl Into<String>,
        category: QuestionCategory,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            text: text.into(),
            answers: Vec::new(),
            affects_components: Vec::new(),
            weight: DEFAULT_QUESTION_WEIGHT,
            is_required: false,
        }
    }

    /// Set the question weight
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the affected component IDs
    #[must_use]
    pub fn affecting<I, S>(mut self, component_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.affects_components = component_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Append a selectable answer
    #[must_use]
    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answers.push(answer);
        self
    }

    /// Mark the question as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Weight applied to this question's evidence.
    ///
    /// A zero, negative or non-finite weight falls back to
    /// [`DEFAULT_QUESTION_WEIGHT`].
    #[must_use]
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            DEFAULT_QUESTION_WEIGHT
        }
    }

    /// Find the answer whose label matches exactly.
    ///
    /// `None` means the label is stale or foreign; callers treat that as
    /// "no evidence" rather than an error.
    #[must_use]
    pub fn resolve_answer(&self, label: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.label == label)
    }

    /// The answer selected for this question in an answer-set, if any
    #[must_use]
    pub fn selected_answer(&self, answers: &AssessmentAnswers) -> Option<&Answer> {
        answers
            .selected(&self.id)
            .and_then(|label| self.resolve_answer(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new("Q1.1", QuestionCategory::StrategicDrivers, "Do you have an EA framework?")
            .affecting(["0.1", "0.2"])
            .with_answer(Answer::new("No", MaturityLevel::Initial).triggers(["G001"]))
            .with_answer(Answer::new("Yes", MaturityLevel::Managed))
    }

    #[test]
    fn test_resolve_answer_exact_match() {
        let q = sample();
        assert_eq!(
            q.resolve_answer("No").map(|a| a.score),
            Some(MaturityLevel::Initial)
        );
        assert!(q.resolve_answer("no").is_none());
        assert!(q.resolve_answer("Maybe").is_none());
    }

    #[test]
    fn test_selected_answer_via_answer_set() {
        let q = sample();
        let mut answers = AssessmentAnswers::new();
        assert!(q.selected_answer(&answers).is_none());
        answers.answer("Q1.1", "Yes");
        assert_eq!(q.selected_answer(&answers).map(|a| a.label.as_str()), Some("Yes"));
    }

    #[test]
    fn test_effective_weight_falls_back() {
        assert_eq!(sample().with_weight(2.0).effective_weight(), 2.0);
        assert_eq!(sample().with_weight(0.0).effective_weight(), 1.0);
        assert_eq!(sample().with_weight(-1.0).effective_weight(), 1.0);
        assert_eq!(sample().with_weight(f64::NAN).effective_weight(), 1.0);
    }

    #[test]
    fn test_deserialize_yaml_with_defaults_and_aliases() {
        let yaml = r#"
id: Q3.1
category: "Data & Analytics"
text: "How is data quality managed?"
affectsComponents: ["3.4"]
answers:
  - label: "Ad hoc"
    score: 1
    triggersGaps: [G012]
  - label: "Automated"
    score: 5
"#;
        let q: Question = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(q.category, QuestionCategory::DataAndAnalytics);
        assert_eq!(q.weight, 1.0);
        assert!(!q.is_required);
        assert_eq!(q.affects_components, vec!["3.4"]);
        assert_eq!(q.answers[0].triggers_gaps, vec!["G012"]);
    }

    #[test]
    fn test_out_of_domain_score_rejected() {
        let yaml = r#"
id: Q3.1
category: Integration
text: "?"
answers:
  - label: "Broken"
    score: 6
"#;
        assert!(serde_yaml::from_str::<Question>(yaml).is_err());
    }
}
