//! Unified error types for ea-assess.
//!
//! The scoring engine itself never fails: unknown references degrade to
//! "not counted". Errors only arise at the edges, when reference data,
//! answer sets or stores are read and written.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ea-assess operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AssessError {
    /// Errors while loading reference data or answer sets
    #[error("Failed to load reference data: {context}")]
    Reference {
        context: String,
        #[source]
        source: ReferenceErrorKind,
    },

    /// Errors from an answer store
    #[error("Answer store failed: {context}")]
    Storage {
        context: String,
        #[source]
        source: StorageErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific reference data error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReferenceErrorKind {
    #[error("Unsupported file extension: {0} (expected .yaml, .yml or .json)")]
    UnsupportedExtension(String),

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),
}

/// Specific storage error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StorageErrorKind {
    #[error("Corrupt saved assessment: {0}")]
    Corrupt(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for ea-assess operations
pub type Result<T> = std::result::Result<T, AssessError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AssessError {
    /// Create a reference data error with context
    pub fn reference(context: impl Into<String>, source: ReferenceErrorKind) -> Self {
        Self::Reference {
            context: context.into(),
            source,
        }
    }

    /// Create a reference error for an unrecognized file extension
    pub fn unsupported_extension(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::reference(
            format!("at {}", path.display()),
            ReferenceErrorKind::UnsupportedExtension(ext),
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a storage error
    pub fn storage(context: impl Into<String>, source: StorageErrorKind) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AssessError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AssessError {
    fn from(err: serde_json::Error) -> Self {
        Self::reference(
            "JSON deserialization",
            ReferenceErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for AssessError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::reference(
            "YAML deserialization",
            ReferenceErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost-first, so an error raised while reading a
/// question bank reads like `loading questions: YAML deserialization`.
///
/// ```ignore
/// use ea_assess::error::ErrorContext;
///
/// let content = std::fs::read_to_string(path).context("reading question bank")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AssessError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: AssessError, new_ctx: &str) -> AssessError {
    match err {
        AssessError::Reference {
            context: existing,
            source,
        } => AssessError::Reference {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssessError::Storage {
            context: existing,
            source,
        } => AssessError::Storage {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssessError::Io {
            path,
            message,
            source,
        } => AssessError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssessError::unsupported_extension("questions.toml");
        let display = err.to_string();
        assert!(
            display.contains("reference") && display.contains("questions.toml"),
            "Error message should mention reference data and the path: {}",
            display
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AssessError::io("/path/to/questions.yaml", io_err);

        assert!(err.to_string().contains("/path/to/questions.yaml"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(AssessError::reference(
                "base",
                ReferenceErrorKind::InvalidYaml("bad indent".to_string()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(AssessError::Reference { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Reference error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(AssessError::storage(
            "error",
            StorageErrorKind::Corrupt("truncated".to_string()),
        ));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_edge_failures_map_to_variants() {
        use crate::storage::{AnswerStore, FileAnswerStore};

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            crate::reference::load_answers(&missing),
            Err(AssessError::Io { .. })
        ));
        assert!(matches!(
            crate::reference::load_answers(&dir.path().join("answers.toml")),
            Err(AssessError::Reference {
                source: ReferenceErrorKind::UnsupportedExtension(_),
                ..
            })
        ));

        let corrupt = dir.path().join("autosave.json");
        std::fs::write(&corrupt, "[1, 2").unwrap();
        assert!(matches!(
            FileAnswerStore::new(&corrupt).load(),
            Err(AssessError::Storage {
                source: StorageErrorKind::Corrupt(_),
                ..
            })
        ));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
