//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".ea-assess.yaml",
    ".ea-assess.yml",
    "ea-assess.yaml",
    "ea-assess.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/ea-assess/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // 2. Search current directory
    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    // 3. Search git root (if in a repo)
    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    // 4. Search user config directory
    if let Some(path) = dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("ea-assess"))) {
        return Some(path);
    }

    // 5. Search home directory
    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
///
/// Relative paths inside the file are resolved against the file's directory.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut config: AppConfig = if content.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str(&content)?
    };
    if let Some(base) = path.parent() {
        config.rebase_paths(base);
    }
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// This is useful for layering CLI args over file config. Values equal to
    /// their defaults in `other` count as unset.
    pub fn merge(&mut self, other: &Self) {
        // Reference data
        if other.reference.taxonomy.is_some() {
            self.reference.taxonomy.clone_from(&other.reference.taxonomy);
        }
        if other.reference.questions.is_some() {
            self.reference.questions.clone_from(&other.reference.questions);
        }
        if other.reference.gap_rules.is_some() {
            self.reference.gap_rules.clone_from(&other.reference.gap_rules);
        }

        // Output config - only override if explicitly set
        if other.output.format != crate::reports::ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.report_types != [crate::reports::ReportType::All] && !other.output.report_types.is_empty() {
            self.output.report_types.clone_from(&other.output.report_types);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.max_items.is_some() {
            self.output.max_items = other.output.max_items;
        }
        if other.output.title.is_some() {
            self.output.title.clone_from(&other.output.title);
        }

        // Storage
        if other.storage.autosave_path.is_some() {
            self.storage.autosave_path.clone_from(&other.storage.autosave_path);
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
        if other.behavior.fail_on_critical {
            self.behavior.fail_on_critical = true;
        }
        if other.behavior.min_maturity.is_some() {
            self.behavior.min_maturity = other.behavior.min_maturity;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# EA Assessment Configuration
# Place this file at .ea-assess.yaml in your project root or ~/.config/ea-assess/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# EA Assessment Configuration File
# ==================================
#
# This file configures ea-assess behavior. Place it at:
#   - .ea-assess.yaml in your project root
#   - ~/.config/ea-assess/ea-assess.yaml for global config
#
# CLI arguments always override file settings. Relative paths are resolved
# against the directory of this file.

# Reference data (bundled data is used for anything not set)
#   taxonomy: ./data/ea_layers.yaml
#   questions: ./data/questions.yaml
#   gap_rules: ./data/gap_rules.yaml
reference: {}

# Output configuration
output:
  # Format: auto, summary, json, csv, markdown
  format: auto
  # Output file path (omit for stdout)
  # file: assessment.md
  # Sections: all, maturity, gaps, recommendations, roadmap, answers
  report_types: [all]
  # Disable colored output
  no_color: false
  # Maximum rows per list section
  # max_items: 20
  # title: Enterprise Architecture Assessment Report

# Answer storage
#   autosave_path: ./assessment.json (defaults to the platform data directory)
storage: {}

# Behavior flags
behavior:
  # Suppress non-essential output
  quiet: false
  # Exit with code 1 if any critical gap is detected
  fail_on_critical: false
  # Exit with code 1 if overall maturity is below this score (0.0-5.0)
  # min_maturity: 2.5
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ReportFormat, ReportType};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".ea-assess.yaml");
        std::fs::write(&config_path, "output:\n  format: json\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
reference:
  questions: bank/questions.yaml
output:
  format: markdown
  report_types: [maturity, gaps]
behavior:
  fail_on_critical: true
  min_maturity: 2.5
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.output.format, ReportFormat::Markdown);
        assert_eq!(config.output.report_types, [ReportType::Maturity, ReportType::Gaps]);
        assert!(config.behavior.fail_on_critical);
        assert_eq!(config.behavior.min_maturity, Some(2.5));
        assert_eq!(
            config.reference.questions,
            Some(tmp.path().join("bank/questions.yaml"))
        );
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "behavior:\n  fail_on_critical: maybe\n").unwrap();
        let err = load_config_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .output_format(ReportFormat::Csv)
            .min_maturity(Some(2.0))
            .build();
        let overrides = AppConfig::builder()
            .report_types(vec![ReportType::Gaps])
            .fail_on_critical(true)
            .min_maturity(Some(3.5))
            .build();

        base.merge(&overrides);

        assert_eq!(base.output.format, ReportFormat::Csv);
        assert_eq!(base.output.report_types, [ReportType::Gaps]);
        assert!(base.behavior.fail_on_critical);
        assert_eq!(base.behavior.min_maturity, Some(3.5));
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("output:"));
        assert!(example.contains("report_types"));

        let full = generate_full_example_config();
        let parsed: AppConfig = serde_yaml::from_str(&full).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "output:\n  no_color: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
