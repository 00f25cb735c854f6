//! Portfolio cost and ROI rollups.
//!
//! Every detected gap contributes its full cost-band midpoint, even when two
//! gaps would plausibly share one remediation project.

use super::DetectedGap;
use crate::utils::to_fixed;

/// Total remediation cost of a set of gaps, in dollars.
#[must_use]
pub fn estimated_cost_usd<'a>(gaps: impl IntoIterator<Item = &'a DetectedGap>) -> f64 {
    gaps.into_iter()
        .map(|g| g.rule.remediation_cost.midpoint_usd())
        .sum()
}

/// Total expected return of a set of gaps, in dollars.
///
/// Each gap's cost midpoint is scaled by its priority band multiplier
/// (Critical 3.5, High 3.0, Medium 2.5, Low 2.0).
#[must_use]
pub fn expected_roi_usd<'a>(gaps: impl IntoIterator<Item = &'a DetectedGap>) -> f64 {
    gaps.into_iter()
        .map(|g| g.rule.remediation_cost.midpoint_usd() * g.rule.priority_band().roi_multiplier())
        .sum()
}

/// Format a dollar amount with a K/M suffix.
///
/// `$X.XM` from one million, `$XK` from one thousand, `$X` below. The
/// scaled amount is rounded as stored, so `$1.15M` prints as `$1.1M`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${}M", to_fixed(amount / 1_000_000.0, 1))
    } else if amount >= 1_000.0 {
        format!("${}K", to_fixed(amount / 1_000.0, 0))
    } else {
        format!("${}", to_fixed(amount, 0))
    }
}
