//! Report generation for assessment results.
//!
//! This module provides multiple output formats for an evaluated assessment:
//! - Summary: Executive summary text for terminals and email
//! - JSON: Structured data for programmatic integration
//! - CSV: Maturity, gap and answer tables for spreadsheets
//! - Markdown: Human-readable documentation
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! Reference text (questions, gap descriptions, vendors) comes from
//! user-editable files and should be escaped before embedding in Markdown
//! or CSV output.

mod csv;
pub mod escape;
mod json;
mod markdown;
mod summary;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata, ReportType};

use crate::model::AssessmentAnswers;
use crate::pipeline::AssessmentResults;
use crate::reference::ReferenceData;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Inputs every reporter renders from.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentReport<'a> {
    pub answers: &'a AssessmentAnswers,
    pub results: &'a AssessmentResults,
    pub reference: &'a ReferenceData,
}

impl<'a> AssessmentReport<'a> {
    #[must_use]
    pub const fn new(
        answers: &'a AssessmentAnswers,
        results: &'a AssessmentResults,
        reference: &'a ReferenceData,
    ) -> Self {
        Self {
            answers,
            results,
            reference,
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render an evaluated assessment
    fn generate(
        &self,
        report: &AssessmentReport<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        report: &AssessmentReport<'_>,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let output = self.generate(report, config)?;
        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}
