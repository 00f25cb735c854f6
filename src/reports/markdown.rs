//! Markdown report generator.

use super::escape::{escape_markdown_inline, escape_markdown_list, escape_markdown_table};
use super::{AssessmentReport, ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportType};
use crate::utils::round1;
use std::fmt::Write as _;

/// Markdown report generator
pub struct MarkdownReporter {
    /// Include the insight bullets under the summary
    include_insights: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_insights: true,
        }
    }

    /// Leave out the insight bullets
    #[must_use]
    pub const fn without_insights(mut self) -> Self {
        self.include_insights = false;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(
        &self,
        report: &AssessmentReport<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let maturity = &report.results.maturity;
        let gaps = &report.results.gaps;
        let mut md = String::new();

        writeln!(md, "# {}\n", escape_markdown_inline(config.title_or_default()))?;
        writeln!(
            md,
            "**Generated:** {} | **Completion:** {}% ({}/{} questions)\n",
            config.generated_at().format("%Y-%m-%d"),
            maturity.completion_percentage,
            maturity.questions_answered,
            maturity.total_questions
        )?;

        md.push_str("## Executive Summary\n\n");
        md.push_str("| Metric | Value |\n|---|---|\n");
        writeln!(
            md,
            "| Overall Maturity | {:.1}/5.0 ({}) |",
            round1(maturity.overall_maturity_score),
            maturity.overall_maturity_label
        )?;
        writeln!(md, "| Total Gaps | {} |", gaps.total_gaps)?;
        writeln!(
            md,
            "| Critical / High / Medium / Low | {} / {} / {} / {} |",
            gaps.critical_gaps, gaps.high_gaps, gaps.medium_gaps, gaps.low_gaps
        )?;
        writeln!(md, "| Estimated Investment | {} |", gaps.total_estimated_cost)?;
        writeln!(md, "| Expected 3-Year ROI | {} |\n", gaps.total_expected_roi)?;

        if self.include_insights && !report.results.insights.is_empty() {
            for insight in &report.results.insights {
                writeln!(
                    md,
                    "- **{}**: {}",
                    escape_markdown_list(&insight.title),
                    escape_markdown_list(&insight.description)
                )?;
            }
            md.push('\n');
        }

        if config.includes(ReportType::Maturity) {
            md.push_str("## Maturity by Layer\n\n");
            if maturity.layers.is_empty() {
                md.push_str("_No layers assessed yet._\n\n");
            } else {
                md.push_str("| Layer | Name | Score | Level | Components Assessed |\n");
                md.push_str("|---:|---|---:|---|---:|\n");
                for layer in &maturity.layers {
                    writeln!(
                        md,
                        "| {} | {} | {:.1} | {} | {}/{} |",
                        layer.layer_id,
                        escape_markdown_table(&layer.layer_name),
                        round1(layer.maturity_score),
                        layer.maturity_level.name(),
                        layer.components.len(),
                        layer.total_components
                    )?;
                }
                md.push('\n');
            }
        }

        if config.includes(ReportType::Gaps) {
            md.push_str("## Gaps\n\n");
            if gaps.gaps.is_empty() {
                md.push_str("_No gaps detected._\n\n");
            } else {
                md.push_str("| Priority | ID | Gap | Layer | Score | Risk | Impact | Cost |\n");
                md.push_str("|---|---|---|---:|---:|---:|---:|---|\n");
                for gap in gaps.gaps.iter().take(config.limit(&gaps.gaps)) {
                    let rule = &gap.rule;
                    writeln!(
                        md,
                        "| {} | {} | {} | {} | {:.1} | {} | {} | {} |",
                        gap.priority_band(),
                        rule.id,
                        escape_markdown_table(&rule.description),
                        rule.layer,
                        round1(gap.priority_score()),
                        rule.risk,
                        rule.business_impact,
                        rule.remediation_cost.description()
                    )?;
                }
                md.push('\n');
            }
        }

        if config.includes(ReportType::Recommendations) && !report.results.recommendations.is_empty() {
            md.push_str("## Recommendations\n\n");
            let recommendations = &report.results.recommendations;
            for rec in recommendations.iter().take(config.limit(recommendations)) {
                let detail = &rec.gap.rule.recommendation;
                writeln!(
                    md,
                    "### {}. {} ({}){}\n",
                    rec.rank,
                    escape_markdown_inline(&detail.title),
                    rec.gap.rule.id,
                    if rec.quick_wins { " - Quick Win" } else { "" }
                )?;
                if !detail.description.is_empty() {
                    writeln!(md, "{}\n", escape_markdown_list(&detail.description))?;
                }
                writeln!(md, "- {}", escape_markdown_list(&rec.rationale))?;
                writeln!(
                    md,
                    "- **Timeline:** {} | **Cost:** {}",
                    escape_markdown_list(&detail.timeline),
                    escape_markdown_list(&detail.estimated_cost)
                )?;
                if !detail.expected_roi.is_empty() {
                    writeln!(md, "- **Expected ROI:** {}", escape_markdown_list(&detail.expected_roi))?;
                }
                if !detail.suggested_vendors.is_empty() {
                    writeln!(
                        md,
                        "- **Suggested vendors:** {}",
                        escape_markdown_list(&detail.suggested_vendors.join(", "))
                    )?;
                }
                md.push('\n');
            }
        }

        if config.includes(ReportType::Roadmap) && !report.results.roadmap.is_empty() {
            md.push_str("## Implementation Roadmap\n\n");
            for phase in &report.results.roadmap {
                writeln!(md, "### {} ({})\n", escape_markdown_inline(&phase.name), phase.timeline)?;
                writeln!(md, "{}\n", escape_markdown_list(&phase.description))?;
                writeln!(
                    md,
                    "**Gaps:** {} | **Critical:** {} | **High:** {} | **Estimated Cost:** {}\n",
                    phase.gaps.len(),
                    phase.critical_count,
                    phase.high_count,
                    phase.estimated_cost
                )?;
                for gap in &phase.gaps {
                    writeln!(
                        md,
                        "- {}: {}",
                        gap.rule.id,
                        escape_markdown_list(&gap.rule.recommendation.title)
                    )?;
                }
                md.push('\n');
            }
        }

        if config.includes(ReportType::Answers) && !report.answers.is_empty() {
            md.push_str("## Answers\n\n");
            md.push_str("| Question | Category | Answer | Score |\n|---|---|---|---:|\n");
            for question in &report.reference.questions {
                let Some(label) = report.answers.selected(&question.id) else {
                    continue;
                };
                let score = question
                    .resolve_answer(label)
                    .map_or_else(|| "-".to_string(), |a| a.score.value().to_string());
                writeln!(
                    md,
                    "| {} {} | {} | {} | {} |",
                    question.id,
                    escape_markdown_table(&question.text),
                    question.category,
                    escape_markdown_table(label),
                    score
                )?;
            }
            md.push('\n');
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssessmentAnswers;
    use crate::pipeline::evaluate;
    use crate::reference::ReferenceData;

    fn generate(reporter: &MarkdownReporter, answers: &AssessmentAnswers, config: &ReportConfig) -> String {
        let reference = ReferenceData::standard().unwrap();
        let results = evaluate(answers, &reference);
        reporter
            .generate(&AssessmentReport::new(answers, &results, &reference), config)
            .unwrap()
    }

    #[test]
    fn test_markdown_sections() {
        let answers: AssessmentAnswers = [("Q7.1", "Passwords only, separate per system")]
            .into_iter()
            .collect();
        let md = generate(&MarkdownReporter::new(), &answers, &ReportConfig::default());

        assert!(md.starts_with("# Enterprise Architecture Assessment Report\n"));
        assert!(md.contains("| Overall Maturity | 1.0/5.0 (Initial (Critical attention needed)) |"));
        assert!(md.contains("| Critical | G024 | No multi-factor authentication (MFA) | 6 | 12.5 | 5 | 5 | Medium |"));
        assert!(md.contains("### 1. Deploy Multi-Factor Authentication (MFA) (G024) - Quick Win"));
        assert!(md.contains("## Answers"));
        assert!(md.contains("- **Assessment Incomplete**"));
        assert!(md.contains("## Implementation Roadmap\n\n### Phase 1: Quick Wins & Critical Fixes (Months 1-6)\n"));
        assert!(md.contains("**Gaps:** 1 | **Critical:** 1 | **High:** 0 | **Estimated Cost:** $300K\n\n- G022: "));
    }

    #[test]
    fn test_empty_assessment() {
        let md = generate(
            &MarkdownReporter::new().without_insights(),
            &AssessmentAnswers::new(),
            &ReportConfig::default(),
        );
        assert!(md.contains("_No layers assessed yet._"));
        assert!(md.contains("_No gaps detected._"));
        assert!(!md.contains("## Recommendations"));
        assert!(!md.contains("## Answers"));
        assert!(!md.contains("## Implementation Roadmap"));
        assert!(!md.contains("Assessment Incomplete"));
    }
}
