//! Thresholds, weights and small shared helpers for bar analysis.

// ============================================================
// CLASSIFIER THRESHOLDS
// ============================================================

/// Body is doji-like: body < range * DOJI_RATIO
pub const DOJI_RATIO: f64 = 0.1;
/// Body dominates the range: ratio > STRONG_BODY_RATIO
pub const STRONG_BODY_RATIO: f64 = 0.7;
/// Body is long: ratio > LONG_BODY_RATIO
pub const LONG_BODY_RATIO: f64 = 0.5;
/// Body is short: ratio < SHORT_BODY_RATIO
pub const SHORT_BODY_RATIO: f64 = 0.3;

/// Doji wick asymmetry: wick > body * DOJI_LONG_WICK_FACTOR
pub const DOJI_LONG_WICK_FACTOR: f64 = 3.0;
/// Shadow is very long: shadow > body * SHADOW_VERYLONG_FACTOR
pub const SHADOW_VERYLONG_FACTOR: f64 = 2.0;
/// Shadow is short: shadow < body * SHADOW_SHORT_FACTOR
pub const SHADOW_SHORT_FACTOR: f64 = 0.5;
/// Marubozu wicks: wick < body * MARUBOZU_WICK_FACTOR
pub const MARUBOZU_WICK_FACTOR: f64 = 0.3;

// ============================================================
// SCORING CONSTANTS
// ============================================================

/// Volume at which volume strength saturates at 100.
pub const VOLUME_SATURATION: f64 = 1_000_000.0;
pub const VOLUME_STRENGTH_CAP: f64 = 100.0;

/// Composite weights for `overall_strength`, in the order
/// body strength, momentum, volatility, volume strength.
pub const WEIGHTS_WITH_VOLUME: [f64; 4] = [0.35, 0.25, 0.15, 0.25];

/// Composite weights for `overall_strength_without_volume`, in the order
/// body strength, momentum, volatility.
pub const WEIGHTS_WITHOUT_VOLUME: [f64; 3] = [0.45, 0.35, 0.20];

// ============================================================
// HELPER FUNCTIONS
// ============================================================

/// Check if body is doji-like.
/// Zero body is always a doji, so a completely flat bar still qualifies.
#[inline]
pub fn is_doji(body: f64, range: f64) -> bool {
    body <= 0.0 || body < range * DOJI_RATIO
}

/// Express a fraction as a percentage.
#[inline]
pub fn percent(value: f64) -> f64 {
    value * 100.0
}

/// Round a price to five decimal places.
#[inline]
pub fn round_price(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

/// Format with `decimals` places, breaking exact ties away from zero.
///
/// `format!` breaks ties to even, which would print `12.25` as `12.2`.
/// Only a value that sits exactly on the midpoint is affected; `1.005` is
/// stored just below it and still prints as `1.00`.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    let exact = value.mul_add(scale, -scaled) == 0.0;
    if value.is_finite() && exact && scaled.fract().abs() == 0.5 {
        let rounded = scaled.round() / scale;
        return format!("{rounded:.decimals$}");
    }
    format!("{value:.decimals$}")
}
