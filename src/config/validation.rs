//! Configuration validation for ea-assess.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, OutputConfig, ReferenceConfig, StorageConfig};
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.reference.validate());
        errors.extend(self.output.validate());
        errors.extend(self.storage.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

fn check_file(field: &str, path: Option<&Path>, errors: &mut Vec<ConfigError>) {
    if let Some(path) = path {
        if !path.is_file() {
            errors.push(ConfigError::new(
                field,
                format!("File does not exist: {}", path.display()),
            ));
        }
    }
}

fn check_parent_dir(field: &str, path: Option<&Path>, errors: &mut Vec<ConfigError>) {
    if let Some(parent) = path.and_then(Path::parent) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            errors.push(ConfigError::new(
                field,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
    }
}

impl Validatable for ReferenceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_file("reference.taxonomy", self.taxonomy.as_deref(), &mut errors);
        check_file("reference.questions", self.questions.as_deref(), &mut errors);
        check_file("reference.gap_rules", self.gap_rules.as_deref(), &mut errors);
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        check_parent_dir("output.file", self.file.as_deref(), &mut errors);

        if self.report_types.is_empty() {
            errors.push(ConfigError::new(
                "output.report_types",
                "At least one report type is required",
            ));
        }

        if self.max_items == Some(0) {
            errors.push(ConfigError::new(
                "output.max_items",
                "max_items must be at least 1",
            ));
        }

        errors
    }
}

impl Validatable for StorageConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(path) = &self.autosave_path {
            if path.is_dir() {
                errors.push(ConfigError::new(
                    "storage.autosave_path",
                    format!("Expected a file path, found a directory: {}", path.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(min) = self.min_maturity {
            if !(0.0..=5.0).contains(&min) {
                errors.push(ConfigError::new(
                    "behavior.min_maturity",
                    format!("Minimum maturity must be between 0.0 and 5.0, got {min}"),
                ));
            }
        }
        errors
    }
}
