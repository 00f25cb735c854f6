//! Decimal rounding for displayed scores and amounts.

/// Round to one decimal place, halves away from zero.
///
/// Scores are always non-negative, so this is half-up: `2.25` becomes `2.3`.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round a ratio to a whole percentage.
///
/// Returns 0 when `total` is 0.
#[must_use]
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (part as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Format `value` with `digits` decimals, rounding the exact binary value.
///
/// Only a value sitting exactly halfway rounds up. `1.15` is stored just
/// below 1.15, so it prints as `1.1`, while `2.25` prints as `2.3`.
#[must_use]
pub fn to_fixed(value: f64, digits: u32) -> String {
    let scale = 10_f64.powi(digits as i32);
    let scaled = value * scale;
    // Rounding error of the product, exact via fused multiply-add
    let error = value.mul_add(scale, -scaled);
    let floor = scaled.floor();
    let fraction = scaled - floor;
    let round_up = fraction > 0.5 || (fraction == 0.5 && error >= 0.0);
    let units = if round_up { floor + 1.0 } else { floor };
    format!("{:.*}", digits as usize, units / scale)
}
