//! The user's answer-set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse mapping from question ID to the selected answer label.
///
/// Entries are only ever upserted or wiped wholesale; there is no way to
/// retract a single answer. Keys are not checked against a question bank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentAnswers {
    selections: BTreeMap<String, String>,
}

impl AssessmentAnswers {
    /// Create an empty answer-set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the answer for a question.
    ///
    /// Returns the previously selected label, if any.
    pub fn answer(
        &mut self,
        question_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Option<String> {
        self.selections.insert(question_id.into(), label.into())
    }

    /// Discard every answer
    pub fn reset(&mut self) {
        self.selections.clear();
    }

    /// Selected label for a question; empty labels count as unanswered
    #[must_use]
    pub fn selected(&self, question_id: &str) -> Option<&str> {
        self.selections
            .get(question_id)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    /// Whether the map holds any entry for the question
    #[must_use]
    pub fn contains(&self, question_id: &str) -> bool {
        self.selections.contains_key(question_id)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Whether no question has been answered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Iterate `(question_id, label)` pairs in question ID order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssessmentAnswers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            selections: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_previous() {
        let mut answers = AssessmentAnswers::new();
        assert_eq!(answers.answer("Q1.1", "No"), None);
        assert_eq!(answers.answer("Q1.1", "Yes"), Some("No".to_string()));
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.selected("Q1.1"), Some("Yes"));
    }

    #[test]
    fn test_reset_wipes_everything() {
        let mut answers: AssessmentAnswers = [("Q1", "a"), ("Q2", "b")].into_iter().collect();
        answers.reset();
        assert!(answers.is_empty());
    }

    #[test]
    fn test_empty_label_is_unanswered_but_present() {
        let answers: AssessmentAnswers = [("Q1", "")].into_iter().collect();
        assert!(answers.contains("Q1"));
        assert_eq!(answers.selected("Q1"), None);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let answers: AssessmentAnswers = [("Q2.1", "Yes"), ("Q1.1", "No")].into_iter().collect();
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"Q1.1":"No","Q2.1":"Yes"}"#);
        let back: AssessmentAnswers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }
}
