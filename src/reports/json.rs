//! JSON report generator.

use super::{AssessmentReport, ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportType};
use crate::gaps::{GapExport, PrioritizedRecommendation, RoadmapPhase};
use crate::maturity::{MaturityInsight, MaturitySummary};
use crate::model::AssessmentAnswers;
use serde::Serialize;

/// Version of the export document layout
const EXPORT_VERSION: &str = "2.0";

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        report: &AssessmentReport<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let results = report.results;
        let maturity = &results.maturity;

        let gaps = config.includes(ReportType::Gaps).then(|| {
            let mut export = GapExport::from_analysis(&results.gaps, config.generated_at());
            let keep = config.limit(&export.gaps);
            export.gaps.truncate(keep);
            export
        });

        let recommendations = &results.recommendations;
        let document = JsonAssessmentReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: config.metadata.tool_version.clone(),
                },
                version: EXPORT_VERSION,
                title: config.title_or_default().to_string(),
                export_date: config.generated_at().to_rfc3339(),
                answers_path: config.metadata.answers_path.clone(),
            },
            assessment: JsonAssessment {
                answers: config.includes(ReportType::Answers).then_some(report.answers),
                questions_answered: maturity.questions_answered,
                total_questions: maturity.total_questions,
                completion_percentage: maturity.completion_percentage,
            },
            maturity: config.includes(ReportType::Maturity).then_some(maturity),
            insights: config
                .includes(ReportType::Maturity)
                .then_some(results.insights.as_slice()),
            gaps,
            recommendations: config
                .includes(ReportType::Recommendations)
                .then(|| &recommendations[..config.limit(recommendations)]),
            roadmap: config
                .includes(ReportType::Roadmap)
                .then_some(results.roadmap.as_slice()),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonAssessmentReport<'a> {
    metadata: JsonReportMetadata,
    assessment: JsonAssessment<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maturity: Option<&'a MaturitySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insights: Option<&'a [MaturityInsight]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gaps: Option<GapExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<&'a [PrioritizedRecommendation]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roadmap: Option<&'a [RoadmapPhase]>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    version: &'static str,
    title: String,
    export_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    answers_path: Option<String>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct JsonAssessment<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    answers: Option<&'a AssessmentAnswers>,
    questions_answered: usize,
    total_questions: usize,
    completion_percentage: u32,
}
