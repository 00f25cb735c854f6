//! Configuration type definitions.

use crate::reports::{ReportConfig, ReportFormat, ReportMetadata, ReportType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
///
/// Aggregates everything the CLI needs. It can be constructed from CLI
/// arguments, a config file, or both (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Reference data overrides (taxonomy, questions, gap rules)
    pub reference: ReferenceConfig,
    /// Output configuration (format, file, colors, sections)
    pub output: OutputConfig,
    /// Answer storage configuration
    pub storage: StorageConfig,
    /// Behavior flags and CI thresholds
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Resolve relative paths against `base`, normally the config file's
    /// directory.
    pub fn rebase_paths(&mut self, base: &Path) {
        let rebase = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        };
        rebase(&mut self.reference.taxonomy);
        rebase(&mut self.reference.questions);
        rebase(&mut self.reference.gap_rules);
        rebase(&mut self.storage.autosave_path);
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Use a custom taxonomy file.
    pub fn taxonomy(mut self, path: Option<PathBuf>) -> Self {
        self.config.reference.taxonomy = path;
        self
    }

    /// Use a custom question bank.
    pub fn questions(mut self, path: Option<PathBuf>) -> Self {
        self.config.reference.questions = path;
        self
    }

    /// Use a custom gap rule catalog.
    pub fn gap_rules(mut self, path: Option<PathBuf>) -> Self {
        self.config.reference.gap_rules = path;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Select report sections.
    pub fn report_types(mut self, types: Vec<ReportType>) -> Self {
        self.config.output.report_types = types;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Cap list sections.
    pub const fn max_items(mut self, max_items: Option<usize>) -> Self {
        self.config.output.max_items = max_items;
        self
    }

    /// Set the report title.
    pub fn title(mut self, title: Option<String>) -> Self {
        self.config.output.title = title;
        self
    }

    /// Use a custom answer store location.
    pub fn autosave_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.storage.autosave_path = path;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Fail when any critical gap is detected.
    pub const fn fail_on_critical(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_critical = fail;
        self
    }

    /// Fail when overall maturity is below `min`.
    pub const fn min_maturity(mut self, min: Option<f64>) -> Self {
        self.config.behavior.min_maturity = min;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section configs
// ============================================================================

/// Reference data locations; unset entries use the bundled data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Taxonomy file (YAML or JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<PathBuf>,
    /// Question bank file (YAML or JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<PathBuf>,
    /// Gap rule catalog file (YAML or JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_rules: Option<PathBuf>,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Report sections to include
    pub report_types: Vec<ReportType>,
    /// Disable colored output
    pub no_color: bool,
    /// Maximum items per list section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// Report title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            report_types: vec![ReportType::All],
            no_color: false,
            max_items: None,
            title: None,
        }
    }
}

impl OutputConfig {
    /// Report generation settings for these output options.
    #[must_use]
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            max_items: self.max_items,
            title: self.title.clone(),
            metadata: ReportMetadata::new(),
            ..ReportConfig::with_types(self.report_types.clone())
        }
    }
}

/// Answer storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StorageConfig {
    /// Autosave file; the platform data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosave_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Explicit autosave path, or the platform default.
    #[must_use]
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.autosave_path
            .clone()
            .or_else(crate::storage::FileAnswerStore::default_path)
    }
}

/// Behavior flags for assessment runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
    /// Exit with code 1 if any critical gap is detected
    pub fail_on_critical: bool,
    /// Exit with code 1 if overall maturity is below this score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_maturity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .report_types(vec![ReportType::Gaps])
            .fail_on_critical(true)
            .min_maturity(Some(3.0))
            .build();
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_critical);
        assert_eq!(config.behavior.min_maturity, Some(3.0));
    }

    #[test]
    fn test_report_config_from_output() {
        let output = OutputConfig {
            report_types: vec![ReportType::Maturity],
            max_items: Some(5),
            ..OutputConfig::default()
        };
        let report = output.report_config();
        assert!(report.includes(ReportType::Maturity));
        assert!(!report.includes(ReportType::Gaps));
        assert_eq!(report.max_items, Some(5));
    }

    #[test]
    fn test_rebase_paths() {
        let mut config = AppConfig::builder()
            .questions(Some(PathBuf::from("data/questions.yaml")))
            .gap_rules(Some(PathBuf::from("/abs/gaps.yaml")))
            .build();
        config.rebase_paths(Path::new("/project"));
        assert_eq!(config.reference.questions, Some(PathBuf::from("/project/data/questions.yaml")));
        assert_eq!(config.reference.gap_rules, Some(PathBuf::from("/abs/gaps.yaml")));
        assert_eq!(config.reference.taxonomy, None);
    }

    #[test]
    fn test_yaml_defaults_fill_missing_sections() {
        let config: AppConfig = serde_yaml::from_str("behavior:\n  fail_on_critical: true\n").unwrap();
        assert!(config.behavior.fail_on_critical);
        assert_eq!(config.output, OutputConfig::default());
    }
}
