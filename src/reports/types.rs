//! Report type definitions.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pick from the output file extension, summary otherwise
    #[default]
    Auto,
    /// Executive summary text
    Summary,
    /// Structured JSON output
    Json,
    /// CSV for spreadsheet import
    Csv,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Auto => write!(f, "auto"),
            ReportFormat::Summary => write!(f, "summary"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Sections that can be included in a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// All sections
    #[default]
    All,
    /// Overall, layer and component maturity
    Maturity,
    /// Detected gaps and portfolio rollups
    Gaps,
    /// Ranked recommendations
    Recommendations,
    /// Phased implementation roadmap
    Roadmap,
    /// The answer-set with per-answer scores
    Answers,
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Which report sections to include
    pub report_types: Vec<ReportType>,
    /// Maximum items per list section
    pub max_items: Option<usize>,
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_types: vec![ReportType::All],
            max_items: None,
            title: None,
            metadata: ReportMetadata::new(),
        }
    }
}

impl ReportConfig {
    /// Create a config for all report types
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a config for specific report types
    pub fn with_types(types: Vec<ReportType>) -> Self {
        if types.is_empty() {
            return Self::default();
        }
        Self {
            report_types: types,
            ..Default::default()
        }
    }

    /// Check if a report type should be included
    pub fn includes(&self, report_type: ReportType) -> bool {
        self.report_types.contains(&ReportType::All) || self.report_types.contains(&report_type)
    }

    /// Report title, falling back to the standard heading
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or("Enterprise Architecture Assessment Report")
    }

    /// Apply `max_items` to a list section
    pub fn limit<T>(&self, items: &[T]) -> usize {
        self.max_items.map_or(items.len(), |max| max.min(items.len()))
    }

    /// Timestamp to stamp on the report
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.metadata.generated_at.unwrap_or_else(Utc::now)
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Answers file the report was generated from
    pub answers_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp; now when unset
    pub generated_at: Option<DateTime<Utc>>,
    /// Custom properties
    pub custom: std::collections::HashMap<String, String>,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_includes() {
        let config = ReportConfig::with_types(vec![ReportType::Gaps]);
        assert!(config.includes(ReportType::Gaps));
        assert!(!config.includes(ReportType::Maturity));
        assert!(ReportConfig::all().includes(ReportType::Answers));
        assert!(ReportConfig::with_types(Vec::new()).includes(ReportType::Maturity));
    }

    #[test]
    fn test_limit() {
        let mut config = ReportConfig::default();
        assert_eq!(config.limit(&[1, 2, 3]), 3);
        config.max_items = Some(2);
        assert_eq!(config.limit(&[1, 2, 3]), 2);
        assert_eq!(config.limit(&[1]), 1);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
        assert_eq!(ReportFormat::default(), ReportFormat::Auto);
    }

    #[test]
    fn test_metadata_version() {
        assert_eq!(ReportMetadata::new().tool_version, env!("CARGO_PKG_VERSION"));
    }
}
