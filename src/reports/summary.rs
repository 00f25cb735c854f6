//! Executive summary report generator.
//!
//! Plain-text report for terminals, email and ticket comments: headline
//! maturity, gap counts, layers from weakest to strongest, the top priority
//! improvements, the phased roadmap and fixed next steps.

use super::{AssessmentReport, ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportType};
use crate::model::PriorityBand;
use crate::utils::round1;

const BANNER_WIDTH: usize = 63;
const RULE_WIDTH: usize = 61;
const TOP_COMPONENTS: usize = 3;

const NEXT_STEPS: [&str; 5] = [
    "1. Review Critical and High priority gaps with leadership",
    "2. Validate cost estimates and ROI projections with finance",
    "3. Prioritize initiatives based on business strategy alignment",
    "4. Develop detailed implementation roadmap (12-36 months)",
    "5. Establish governance model for EA transformation",
];

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn band_color(band: PriorityBand) -> &'static str {
    match band {
        PriorityBand::Critical => "red",
        PriorityBand::High => "yellow",
        PriorityBand::Medium => "cyan",
        PriorityBand::Low => "dim",
    }
}

fn score_color(score: f64) -> &'static str {
    if score >= 4.0 {
        "green"
    } else if score >= 3.0 {
        "cyan"
    } else if score >= 2.0 {
        "yellow"
    } else {
        "red"
    }
}

/// Executive summary reporter
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn banner(&self, lines: &mut Vec<String>, title: &str) {
        let bar = "═".repeat(BANNER_WIDTH);
        lines.push(self.color(&bar, "dim"));
        lines.push(self.color(&format!("       {title}"), "bold"));
        lines.push(self.color(&bar, "dim"));
    }

    fn heading(&self, lines: &mut Vec<String>, title: &str) {
        lines.push(self.color(title, "bold"));
        lines.push(self.color(&"─".repeat(RULE_WIDTH), "dim"));
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        report: &AssessmentReport<'_>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let maturity = &report.results.maturity;
        let gaps = &report.results.gaps;
        let mut lines = Vec::new();

        // Header
        self.banner(&mut lines, &config.title_or_default().to_uppercase());
        lines.push(String::new());
        lines.push(format!(
            "Report Date: {}",
            config.generated_at().format("%Y-%m-%d")
        ));
        lines.push(format!(
            "Assessment Completion: {}%",
            maturity.completion_percentage
        ));
        lines.push(String::new());

        // Headline
        self.heading(&mut lines, "EXECUTIVE SUMMARY");
        let overall = round1(maturity.overall_maturity_score);
        lines.push(format!(
            "Overall EA Maturity Score: {}",
            self.color(&format!("{overall:.1}/5.0"), score_color(overall))
        ));
        lines.push(format!("Maturity Level: {}", maturity.overall_maturity_label));
        lines.push(String::new());

        if config.includes(ReportType::Gaps) && gaps.total_gaps > 0 {
            lines.push(format!(
                "Improvement Opportunities Identified: {}",
                gaps.total_gaps
            ));
            for (band, count) in [
                (PriorityBand::Critical, gaps.critical_gaps),
                (PriorityBand::High, gaps.high_gaps),
                (PriorityBand::Medium, gaps.medium_gaps),
                (PriorityBand::Low, gaps.low_gaps),
            ] {
                lines.push(format!(
                    "  • {} Priority: {}",
                    band,
                    self.color(&count.to_string(), band_color(band))
                ));
            }
            lines.push(String::new());
            lines.push(format!(
                "Estimated Investment Required: {}",
                gaps.total_estimated_cost
            ));
            lines.push(format!("Expected 3-Year ROI: {}", gaps.total_expected_roi));
        }
        lines.push(String::new());

        // Layers, weakest first
        if config.includes(ReportType::Maturity) {
            self.heading(&mut lines, "LAYER-BY-LAYER MATURITY ASSESSMENT");

            let mut layers: Vec<_> = maturity.layers.iter().collect();
            layers.sort_by(|a, b| a.maturity_score.total_cmp(&b.maturity_score));

            for layer in layers {
                let score = round1(layer.maturity_score);
                lines.push(String::new());
                lines.push(format!(
                    "{}. {}",
                    layer.layer_id,
                    layer.layer_name.to_uppercase()
                ));
                lines.push(format!(
                    "   Maturity Score: {} ({})",
                    self.color(&format!("{score:.1}/5.0"), score_color(score)),
                    layer.maturity_label
                ));
                lines.push(format!(
                    "   Components Assessed: {}",
                    layer.components.len()
                ));

                let mut components: Vec<_> = layer.components.iter().collect();
                components.sort_by(|a, b| b.maturity_score.total_cmp(&a.maturity_score));
                if !components.is_empty() {
                    lines.push("   Top Components:".to_string());
                    for component in components.into_iter().take(TOP_COMPONENTS) {
                        lines.push(format!(
                            "     • {}: {:.1}/5.0",
                            component.component_name,
                            round1(component.maturity_score)
                        ));
                    }
                }
            }
            lines.push(String::new());
        }

        // Top improvements
        if config.includes(ReportType::Recommendations) && !gaps.top_gaps.is_empty() {
            lines.push(String::new());
            self.heading(&mut lines, "TOP 10 PRIORITY IMPROVEMENTS");

            for (index, gap) in gaps.top_gaps.iter().take(config.limit(&gaps.top_gaps)).enumerate() {
                let rule = &gap.rule;
                let band = gap.priority_band();
                lines.push(String::new());
                lines.push(format!(
                    "{}. {} {}",
                    index + 1,
                    self.color(
                        &format!("[{}]", band.name().to_uppercase()),
                        band_color(band)
                    ),
                    rule.description
                ));
                lines.push(format!(
                    "   Layer: {} | Priority Score: {:.1}",
                    report.reference.taxonomy.layer_name(rule.layer),
                    round1(gap.priority_score())
                ));
                lines.push(format!(
                    "   Risk: {}/5 | Impact: {}/5 | Cost: {}/5",
                    rule.risk,
                    rule.business_impact,
                    rule.remediation_cost.value()
                ));
                lines.push(format!(
                    "   Recommendation: {}",
                    rule.recommendation.title
                ));
                lines.push(format!(
                    "   Timeline: {} | Cost: {}",
                    rule.recommendation.timeline, rule.recommendation.estimated_cost
                ));
                lines.push(format!(
                    "   Expected ROI: {}",
                    rule.recommendation.expected_roi
                ));
            }
        }

        if config.includes(ReportType::Roadmap) && !report.results.roadmap.is_empty() {
            lines.push(String::new());
            lines.push(String::new());
            self.heading(&mut lines, "IMPLEMENTATION ROADMAP");

            for phase in &report.results.roadmap {
                lines.push(String::new());
                lines.push(format!(
                    "{} ({})",
                    self.color(&phase.name, "bold"),
                    phase.timeline
                ));
                lines.push(format!("   {}", phase.description));
                lines.push(format!(
                    "   Gaps: {} | Critical: {} | High: {} | Estimated Cost: {}",
                    phase.gaps.len(),
                    phase.critical_count,
                    phase.high_count,
                    phase.estimated_cost
                ));
                for gap in &phase.gaps {
                    lines.push(format!(
                        "     • {} {}",
                        gap.rule.id, gap.rule.recommendation.title
                    ));
                }
            }
        }

        lines.push(String::new());
        lines.push(String::new());
        self.heading(&mut lines, "NEXT STEPS");
        lines.extend(NEXT_STEPS.iter().map(ToString::to_string));
        lines.push(String::new());
        self.banner(&mut lines, "END OF REPORT");

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
