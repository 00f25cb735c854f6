//! Maturity levels and the 1-5 scoring domain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used for scores that have no contributing answers.
pub const NOT_ASSESSED_LABEL: &str = "Not assessed";

/// Display color for unassessed components and layers.
pub const NOT_ASSESSED_COLOR: &str = "#E5E7EB";

/// A bounded 1-5 value fell outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be between 1 and 5, got {value}")]
pub struct OutOfDomain {
    pub field: &'static str,
    pub value: u8,
}

/// Maturity level on the five-step scale.
///
/// Doubles as the score domain of an [`Answer`](super::Answer): every answer
/// carries exactly one of these, deserialized from an integer 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MaturityLevel {
    /// 1: critical attention needed
    Initial = 1,
    /// 2: significant gaps
    Developing = 2,
    /// 3: on track
    Defined = 3,
    /// 4: above average
    Managed = 4,
    /// 5: best-in-class
    Optimized = 5,
}

impl MaturityLevel {
    /// All levels, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Initial,
        Self::Developing,
        Self::Defined,
        Self::Managed,
        Self::Optimized,
    ];

    /// Map a continuous score onto its level band.
    ///
    /// `[4.5, 5.0]` is Optimized, `[3.5, 4.5)` Managed, `[2.5, 3.5)` Defined,
    /// `[1.5, 2.5)` Developing, anything lower Initial.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 4.5 {
            Self::Optimized
        } else if score >= 3.5 {
            Self::Managed
        } else if score >= 2.5 {
            Self::Defined
        } else if score >= 1.5 {
            Self::Developing
        } else {
            Self::Initial
        }
    }

    /// Numeric value (1-5)
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Numeric value as a score
    #[must_use]
    pub fn as_score(self) -> f64 {
        f64::from(self.value())
    }

    /// Short level name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Developing => "Developing",
            Self::Defined => "Defined",
            Self::Managed => "Managed",
            Self::Optimized => "Optimized",
        }
    }

    /// Level name with its qualitative description
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initial => "Initial (Critical attention needed)",
            Self::Developing => "Developing (Significant gaps)",
            Self::Defined => "Defined (On track)",
            Self::Managed => "Managed (Above average)",
            Self::Optimized => "Optimized (Best-in-class)",
        }
    }

    /// Hex color used by the visual map
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Initial => "#FEE2E2",
            Self::Developing => "#FED7AA",
            Self::Defined => "#FEF3C7",
            Self::Managed => "#D1FAE5",
            Self::Optimized => "#A7F3D0",
        }
    }
}

impl TryFrom<u8> for MaturityLevel {
    type Error = OutOfDomain;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Initial),
            2 => Ok(Self::Developing),
            3 => Ok(Self::Defined),
            4 => Ok(Self::Managed),
            5 => Ok(Self::Optimized),
            _ => Err(OutOfDomain {
                field: "maturity score",
                value,
            }),
        }
    }
}

impl From<MaturityLevel> for u8 {
    fn from(level: MaturityLevel) -> Self {
        level.value()
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
