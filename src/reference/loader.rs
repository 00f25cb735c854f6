//! File loaders for reference data and answer-sets.

use crate::error::{AssessError, ErrorContext, Result};
use crate::model::{AssessmentAnswers, GapCatalog, Question, Taxonomy};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Bundled starter question bank.
const STANDARD_QUESTIONS_YAML: &str = include_str!("../../data/questions.yaml");

/// Serialization format of a data file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Yaml,
    Json,
}

impl DataFormat {
    /// Detect the format from a file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(AssessError::unsupported_extension(path)),
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DataFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| AssessError::io(path, e))?;
    format
        .parse(&content)
        .with_context(|| format!("parsing {}", path.display()))
}

/// A question bank is either `questions: [...]` or a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionBankFile {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

impl From<QuestionBankFile> for Vec<Question> {
    fn from(file: QuestionBankFile) -> Self {
        match file {
            QuestionBankFile::Wrapped { questions } | QuestionBankFile::Bare(questions) => questions,
        }
    }
}

/// An answers file is either a plain `{question_id: label}` map or a saved
/// envelope `{saved_date, answers}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnswersFile {
    Envelope {
        #[serde(default, alias = "savedDate")]
        saved_date: Option<DateTime<Utc>>,
        answers: AssessmentAnswers,
    },
    Plain(AssessmentAnswers),
}

/// Load a taxonomy file (`layers: [...]`).
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy> {
    let taxonomy = load_file::<Taxonomy>(path).context("loading taxonomy")?;
    tracing::debug!(path = %path.display(), layers = taxonomy.layers.len(), "Loaded taxonomy");
    Ok(taxonomy)
}

/// Load a question bank.
pub fn load_questions(path: &Path) -> Result<Vec<Question>> {
    let file = load_file::<QuestionBankFile>(path).context("loading question bank")?;
    let questions: Vec<Question> = file.into();
    tracing::debug!(path = %path.display(), questions = questions.len(), "Loaded question bank");
    Ok(questions)
}

/// The bundled starter question bank.
pub fn standard_questions() -> Result<Vec<Question>> {
    let file = DataFormat::Yaml
        .parse::<QuestionBankFile>(STANDARD_QUESTIONS_YAML)
        .context("bundled question bank")?;
    Ok(file.into())
}

/// Load a gap rule catalog (`gaps: [...]`).
pub fn load_gap_catalog(path: &Path) -> Result<GapCatalog> {
    let catalog = load_file::<GapCatalog>(path).context("loading gap catalog")?;
    tracing::debug!(path = %path.display(), rules = catalog.len(), "Loaded gap catalog");
    Ok(catalog)
}

/// Load an answer-set from a plain map or a saved envelope.
pub fn load_answers(path: &Path) -> Result<AssessmentAnswers> {
    let file = load_file::<AnswersFile>(path).context("loading answers")?;
    Ok(unwrap_answers(file))
}

/// Parse an answer-set from JSON or YAML text in either accepted shape.
pub fn parse_answers(content: &str, format: DataFormat) -> Result<AssessmentAnswers> {
    let file = format.parse::<AnswersFile>(content).context("parsing answers")?;
    Ok(unwrap_answers(file))
}

fn unwrap_answers(file: AnswersFile) -> AssessmentAnswers {
    match file {
        AnswersFile::Envelope {
            saved_date,
            answers,
        } => {
            if let Some(saved) = saved_date {
                tracing::debug!(saved_date = %saved, answered = answers.len(), "Read saved answer-set");
            }
            answers
        }
        AnswersFile::Plain(answers) => answers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.yaml")).unwrap(), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(Path::new("a.YML")).unwrap(), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(Path::new("a.json")).unwrap(), DataFormat::Json);
        assert!(DataFormat::from_path(Path::new("a.toml")).is_err());
        assert!(DataFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_standard_questions_parse() {
        let questions = standard_questions().unwrap();
        assert!(!questions.is_empty());
        assert!(questions.iter().all(|q| !q.answers.is_empty()));
    }

    #[test]
    fn test_answers_plain_and_envelope() {
        let plain = parse_answers(r#"{"Q1": "Yes"}"#, DataFormat::Json).unwrap();
        assert_eq!(plain.selected("Q1"), Some("Yes"));

        let envelope = parse_answers(
            r#"{"savedDate": "2026-01-02T03:04:05Z", "answers": {"Q1": "No", "Q2": "Yes"}}"#,
            DataFormat::Json,
        )
        .unwrap();
        assert_eq!(envelope.len(), 2);
        assert_eq!(envelope.selected("Q1"), Some("No"));

        let yaml = parse_answers("answers:\n  Q3: Maybe\n", DataFormat::Yaml).unwrap();
        assert_eq!(yaml.selected("Q3"), Some("Maybe"));
    }

    #[test]
    fn test_malformed_answers_rejected() {
        assert!(parse_answers("[1, 2]", DataFormat::Json).is_err());
    }
}
