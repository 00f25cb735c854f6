//! CSV report generator.
//!
//! Generates comma-separated sections (maturity, gaps, recommendations,
//! roadmap, answers) suitable for spreadsheet import.

use super::escape::escape_csv;
use super::{AssessmentReport, ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportType};
use crate::model::NOT_ASSESSED_LABEL;
use crate::utils::round1;
use std::fmt::Write as _;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = fields
        .into_iter()
        .map(|f| escape_csv(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

fn score(value: f64) -> String {
    format!("{:.1}", round1(value))
}

impl ReportGenerator for CsvReporter {
    fn generate(
        &self,
        report: &AssessmentReport<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut sections = Vec::new();

        if config.includes(ReportType::Maturity) {
            sections.push(maturity_section(report)?);
        }
        if config.includes(ReportType::Gaps) {
            sections.push(gaps_section(report, config)?);
        }
        if config.includes(ReportType::Recommendations) {
            sections.push(recommendations_section(report, config));
        }
        if config.includes(ReportType::Roadmap) {
            sections.push(roadmap_section(report));
        }
        if config.includes(ReportType::Answers) {
            sections.push(answers_section(report));
        }

        Ok(sections.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn maturity_section(report: &AssessmentReport<'_>) -> Result<String, ReportError> {
    let maturity = &report.results.maturity;
    let mut content = String::from("# Maturity\n");

    content.push_str(&row(["Overall Maturity Score", score(maturity.overall_maturity_score).as_str()]));
    content.push_str(&row(["Overall Maturity Level", maturity.overall_maturity_label.as_str()]));
    writeln!(
        content,
        "Questions Answered,{}/{}",
        maturity.questions_answered, maturity.total_questions
    )?;
    writeln!(content, "Completion,{}%", maturity.completion_percentage)?;
    content.push('\n');

    content.push_str(
        "Layer ID,Layer Name,Maturity Score,Maturity Level,Maturity Label,Components Assessed\n",
    );
    for layer in &maturity.layers {
        content.push_str(&row([
            layer.layer_id.to_string(),
            layer.layer_name.clone(),
            score(layer.maturity_score),
            layer.maturity_level.value().to_string(),
            layer.maturity_label.clone(),
            format!("{}/{}", layer.components.len(), layer.total_components),
        ]));
    }
    content.push('\n');

    content.push_str(
        "Component ID,Component Name,Layer ID,Maturity Score,Maturity Level,Maturity Label,Contributing Questions\n",
    );
    for component in maturity.components() {
        content.push_str(&row([
            component.component_id.clone(),
            component.component_name.clone(),
            component.layer_id.to_string(),
            score(component.maturity_score),
            component.maturity_level.value().to_string(),
            component.maturity_label.clone(),
            component.contributing_questions.to_string(),
        ]));
    }

    Ok(content)
}

fn gaps_section(report: &AssessmentReport<'_>, config: &ReportConfig) -> Result<String, ReportError> {
    let gaps = &report.results.gaps;
    let mut content = String::from("# Gaps\n");

    writeln!(content, "Total Gaps,{}", gaps.total_gaps)?;
    writeln!(content, "Critical,{}", gaps.critical_gaps)?;
    writeln!(content, "High,{}", gaps.high_gaps)?;
    writeln!(content, "Medium,{}", gaps.medium_gaps)?;
    writeln!(content, "Low,{}", gaps.low_gaps)?;
    content.push_str(&row(["Estimated Investment", gaps.total_estimated_cost.as_str()]));
    content.push_str(&row(["Expected ROI", gaps.total_expected_roi.as_str()]));
    content.push('\n');

    content.push_str(
        "Gap ID,Description,Priority,Priority Score,Layer,Component,Risk,Impact,Cost,Recommendation,Timeline,Estimated Cost,Expected ROI,Suggested Vendors\n",
    );
    for gap in gaps.gaps.iter().take(config.limit(&gaps.gaps)) {
        let rule = &gap.rule;
        content.push_str(&row([
            rule.id.clone(),
            rule.description.clone(),
            gap.priority_band().name().to_string(),
            score(gap.priority_score()),
            rule.layer.to_string(),
            rule.component_id.clone(),
            rule.risk.value().to_string(),
            rule.business_impact.value().to_string(),
            rule.remediation_cost.value().to_string(),
            rule.recommendation.title.clone(),
            rule.recommendation.timeline.clone(),
            rule.recommendation.estimated_cost.clone(),
            rule.recommendation.expected_roi.clone(),
            rule.recommendation.suggested_vendors.join("; "),
        ]));
    }

    Ok(content)
}

fn recommendations_section(report: &AssessmentReport<'_>, config: &ReportConfig) -> String {
    let recommendations = &report.results.recommendations;
    let mut content = String::from("# Recommendations\n");
    content.push_str("Rank,Gap ID,Title,Quick Win,Rationale\n");

    for rec in recommendations.iter().take(config.limit(recommendations)) {
        content.push_str(&row([
            rec.rank.to_string(),
            rec.gap.rule.id.clone(),
            rec.gap.rule.recommendation.title.clone(),
            if rec.quick_wins { "Yes" } else { "No" }.to_string(),
            rec.rationale.clone(),
        ]));
    }
    content
}

/// One row per scheduled gap, phases in order.
fn roadmap_section(report: &AssessmentReport<'_>) -> String {
    let mut content = String::from("# Roadmap\n");
    content.push_str("Phase,Timeline,Gap ID,Recommendation,Priority\n");

    for phase in &report.results.roadmap {
        for gap in &phase.gaps {
            content.push_str(&row([
                phase.name.as_str(),
                phase.timeline.as_str(),
                gap.rule.id.as_str(),
                gap.rule.recommendation.title.as_str(),
                gap.priority_band().name(),
            ]));
        }
    }
    content
}

/// Answered questions in bank order; labels that no longer match an answer
/// keep their text with no score.
fn answers_section(report: &AssessmentReport<'_>) -> String {
    let mut content = String::from("# Answers\n");
    content.push_str("Question ID,Category,Question,Answer,Score,Affects Components,Triggers Gaps\n");

    for question in &report.reference.questions {
        let Some(label) = report.answers.selected(&question.id) else {
            continue;
        };
        let answer = question.resolve_answer(label);
        content.push_str(&row([
            question.id.clone(),
            question.category.name().to_string(),
            question.text.clone(),
            label.to_string(),
            answer.map_or_else(|| NOT_ASSESSED_LABEL.to_string(), |a| a.score.value().to_string()),
            question.affects_components.join("; "),
            answer.map(|a| a.triggers_gaps.join("; ")).unwrap_or_default(),
        ]));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssessmentAnswers;
    use crate::pipeline::evaluate;
    use crate::reference::ReferenceData;

    fn generate(answers: &AssessmentAnswers, config: &ReportConfig) -> String {
        let reference = ReferenceData::standard().unwrap();
        let results = evaluate(answers, &reference);
        CsvReporter::new()
            .generate(&AssessmentReport::new(answers, &results, &reference), config)
            .unwrap()
    }

    fn answers() -> AssessmentAnswers {
        [
            ("Q2.1", "No framework or governance"),
            ("Q7.1", "Passwords only, separate per system"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_all_sections_present() {
        let csv = generate(&answers(), &ReportConfig::default());
        for heading in ["# Maturity", "# Gaps", "# Recommendations", "# Roadmap", "# Answers"] {
            assert!(csv.contains(heading), "missing {heading}");
        }
        assert!(csv.contains("Overall Maturity Score,1.0\n"));
        assert!(csv.contains("Questions Answered,2/"));
        assert!(csv.contains("Total Gaps,3\nCritical,3\nHigh,0\n"));
    }

    #[test]
    fn test_gap_rows_quote_vendor_lists() {
        let csv = generate(&answers(), &ReportConfig::with_types(vec![ReportType::Gaps]));
        let row = csv.lines().find(|l| l.starts_with("G001,")).unwrap();
        assert!(row.contains(",Critical,12.5,0,0.1,5,5,2,"));
        assert!(row.ends_with("LeanIX; Ardoq; Bizzdesign; Avolution ABACUS"));
        assert!(!csv.contains("# Maturity"));
    }

    #[test]
    fn test_roadmap_rows_follow_phases() {
        let csv = generate(&answers(), &ReportConfig::with_types(vec![ReportType::Roadmap]));
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows[0], "# Roadmap");
        assert_eq!(rows[1], "Phase,Timeline,Gap ID,Recommendation,Priority");
        assert!(rows[2].starts_with("Phase 1: Quick Wins & Critical Fixes,Months 1-6,G001,"));
        assert!(rows[3].starts_with("Phase 1: Quick Wins & Critical Fixes,Months 1-6,G022,"));
        assert!(rows[3].ends_with(",Critical"));
        // G024 has a 2-4 month timeline and no phase
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_answers_section_rows() {
        let csv = generate(&answers(), &ReportConfig::with_types(vec![ReportType::Answers]));
        let row = csv.lines().find(|l| l.starts_with("Q7.1,")).unwrap();
        assert!(row.starts_with("Q7.1,Security & Compliance,How do users authenticate"));
        assert!(row.ends_with(",1,6.1; 6.2; 8.9,G024; G022"));
    }

    #[test]
    fn test_stale_label_has_no_score() {
        let answers: AssessmentAnswers = [("Q7.1", "Retired option")].into_iter().collect();
        let csv = generate(&answers, &ReportConfig::with_types(vec![ReportType::Answers]));
        let row = csv.lines().find(|l| l.starts_with("Q7.1,")).unwrap();
        assert!(row.ends_with(",Retired option,Not assessed,6.1; 6.2; 8.9,"));
    }
}
