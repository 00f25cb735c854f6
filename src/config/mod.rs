//! Configuration module for ea-assess.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ea_assess::config::{file::load_or_default, AppConfig};
//! use ea_assess::reports::ReportFormat;
//!
//! // Use builder
//! let overrides = AppConfig::builder()
//!     .output_format(ReportFormat::Markdown)
//!     .fail_on_critical(true)
//!     .build();
//!
//! // Load from file and layer CLI values on top
//! let (mut config, _loaded_from) = load_or_default(None);
//! config.merge(&overrides);
//! ```
//!
//! # Configuration File
//!
//! Place a `.ea-assess.yaml` file in your project root or `~/.config/ea-assess/`:
//!
//! ```yaml
//! reference:
//!   questions: ./questions.yaml
//! behavior:
//!   fail_on_critical: true
//!   min_maturity: 2.5
//! ```

pub mod file;
mod types;
mod validation;

// Re-export main types
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig, ReferenceConfig, StorageConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.ea-assess.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = value["properties"].as_object().unwrap();
        for section in ["reference", "output", "storage", "behavior"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
