//! Gap rules, their scoring inputs, and the rule catalog.

use super::OutOfDomain;
use crate::error::{ErrorContext, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Bundled standard gap catalog (41 rules).
const STANDARD_GAP_RULES_YAML: &str = include_str!("../../data/gap_rules.yaml");

/// A 1-5 rating for risk or business impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, rejecting values outside 1-5
    pub fn new(value: u8) -> std::result::Result<Self, OutOfDomain> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(OutOfDomain {
                field: "rating",
                value,
            })
        }
    }

    /// Numeric value (1-5)
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = OutOfDomain;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remediation cost band, stored as 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CostBand {
    S = 1,
    M = 2,
    L = 3,
    Xl = 4,
    Xxl = 5,
}

impl CostBand {
    /// Numeric value (1-5), the divisor in the priority formula
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Short band code
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
        }
    }

    /// Human-readable band name
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::S => "Small",
            Self::M => "Medium",
            Self::L => "Large",
            Self::Xl => "Extra Large",
            Self::Xxl => "Very Large",
        }
    }

    /// Representative dollar cost used for portfolio rollups
    #[must_use]
    pub const fn midpoint_usd(self) -> f64 {
        match self {
            Self::S => 100_000.0,
            Self::M => 300_000.0,
            Self::L => 800_000.0,
            Self::Xl => 2_000_000.0,
            Self::Xxl => 5_000_000.0,
        }
    }
}

impl TryFrom<u8> for CostBand {
    type Error = OutOfDomain;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::S),
            2 => Ok(Self::M),
            3 => Ok(Self::L),
            4 => Ok(Self::Xl),
            5 => Ok(Self::Xxl),
            _ => Err(OutOfDomain {
                field: "remediation cost",
                value,
            }),
        }
    }
}

impl From<CostBand> for u8 {
    fn from(band: CostBand) -> Self {
        band.value()
    }
}

/// Priority band derived from a priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityBand {
    Critical,
    High,
    Medium,
    Low,
}

impl PriorityBand {
    /// All bands, most urgent first
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Map a priority score to its band (>=8, >=5, >=3, else Low)
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::Critical
        } else if score >= 5.0 {
            Self::High
        } else if score >= 3.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Expected return per dollar spent on a gap in this band
    #[must_use]
    pub const fn roi_multiplier(self) -> f64 {
        match self {
            Self::Critical => 3.5,
            Self::High => 3.0,
            Self::Medium => 2.5,
            Self::Low => 2.0,
        }
    }
}

impl std::fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rough sizing of a remediation initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitiativeType {
    #[serde(rename = "Quick Win")]
    QuickWin,
    #[serde(rename = "Medium-Term")]
    MediumTerm,
    Strategic,
}

/// Investment range in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    pub min: u64,
    pub max: u64,
}

/// Remediation advice attached to a gap rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    #[serde(default, alias = "suggestedVendors")]
    pub suggested_vendors: Vec<String>,
    #[serde(default)]
    pub timeline: String,
    #[serde(default, alias = "estimatedCost")]
    pub estimated_cost: String,
    #[serde(default, alias = "expectedROI")]
    pub expected_roi: String,
    #[serde(default, alias = "initiativeType", skip_serializing_if = "Option::is_none")]
    pub initiative_type: Option<InitiativeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment: Option<Investment>,
    #[serde(default, alias = "paybackPeriod", skip_serializing_if = "Option::is_none")]
    pub payback_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, alias = "businessBenefit", skip_serializing_if = "Option::is_none")]
    pub business_benefit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, alias = "successMetrics", skip_serializing_if = "Vec::is_empty")]
    pub success_metrics: Vec<String>,
}

/// `(risk × impact) / cost`.
#[must_use]
pub fn priority_score_of(risk: Rating, impact: Rating, cost: CostBand) -> f64 {
    f64::from(risk.value()) * f64::from(impact.value()) / f64::from(cost.value())
}

/// A static catalog entry describing one possible gap.
///
/// Priority score and band are derived from the three ratings on every read
/// and emitted alongside the rule when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ScoredGapRule")]
pub struct GapRule {
    /// Rule ID ("G001")
    pub id: String,
    pub description: String,
    /// Layer the affected component belongs to
    pub layer: u8,
    #[serde(alias = "componentId")]
    pub component_id: String,
    #[serde(default, alias = "componentName")]
    pub component_name: Option<String>,
    pub risk: Rating,
    #[serde(alias = "businessImpact")]
    pub business_impact: Rating,
    #[serde(alias = "remediationCost")]
    pub remediation_cost: CostBand,
    pub recommendation: Recommendation,
}

impl GapRule {
    /// Derived priority score
    #[must_use]
    pub fn priority_score(&self) -> f64 {
        priority_score_of(self.risk, self.business_impact, self.remediation_cost)
    }

    /// Derived priority band
    #[must_use]
    pub fn priority_band(&self) -> PriorityBand {
        PriorityBand::from_score(self.priority_score())
    }

    /// High payoff (score >= 5) at manageable cost (band S or M)
    #[must_use]
    pub fn is_quick_win(&self) -> bool {
        self.priority_score() >= 5.0 && self.remediation_cost <= CostBand::M
    }
}

/// Serialized form of a [`GapRule`], including derived priority.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredGapRule {
    pub id: String,
    pub description: String,
    pub layer: u8,
    pub component_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    pub risk: Rating,
    pub business_impact: Rating,
    pub remediation_cost: CostBand,
    pub priority_score: f64,
    pub priority_band: PriorityBand,
    pub recommendation: Recommendation,
}

impl From<GapRule> for ScoredGapRule {
    fn from(rule: GapRule) -> Self {
        let priority_score = rule.priority_score();
        Self {
            priority_band: PriorityBand::from_score(priority_score),
            priority_score,
            id: rule.id,
            description: rule.description,
            layer: rule.layer,
            component_id: rule.component_id,
            component_name: rule.component_name,
            risk: rule.risk,
            business_impact: rule.business_impact,
            remediation_cost: rule.remediation_cost,
            recommendation: rule.recommendation,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    gaps: Vec<GapRule>,
}

impl From<CatalogFile> for GapCatalog {
    fn from(file: CatalogFile) -> Self {
        Self::from_rules(file.gaps)
    }
}

/// Gap rules keyed by ID, in authoring order.
///
/// Authoring order is the tie-breaker when detected gaps share a priority
/// score.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "CatalogFile")]
pub struct GapCatalog {
    rules: IndexMap<String, GapRule>,
    duplicate_ids: Vec<String>,
}

impl GapCatalog {
    /// Number of rules in the standard catalog
    pub const STANDARD_RULE_COUNT: usize = 41;

    /// Build a catalog from rules.
    ///
    /// A repeated ID replaces the earlier rule but keeps its position; the
    /// ID is recorded in [`duplicate_ids`](Self::duplicate_ids).
    pub fn from_rules(rules: impl IntoIterator<Item = GapRule>) -> Self {
        let mut catalog = Self::default();
        for rule in rules {
            if let Some(previous) = catalog.rules.insert(rule.id.clone(), rule) {
                tracing::warn!(gap_id = %previous.id, "Duplicate gap rule ID, later definition wins");
                catalog.duplicate_ids.push(previous.id);
            }
        }
        catalog
    }

    /// The bundled standard catalog.
    pub fn standard() -> Result<Self> {
        Self::from_yaml_str(STANDARD_GAP_RULES_YAML).context("bundled gap catalog")
    }

    /// Parse a catalog from YAML (`gaps: [...]`).
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Look up a rule by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GapRule> {
        self.rules.get(id)
    }

    /// Authoring position of a rule
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules.get_index_of(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in authoring order
    pub fn iter(&self) -> impl Iterator<Item = &GapRule> {
        self.rules.values()
    }

    /// IDs that appeared more than once when the catalog was built
    #[must_use]
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicate_ids
    }
}
