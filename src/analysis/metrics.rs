//! Per-bar strength metrics.

use serde::{Deserialize, Deserializer, Serialize};

use super::helpers::{
    percent, VOLUME_SATURATION, VOLUME_STRENGTH_CAP, WEIGHTS_WITHOUT_VOLUME, WEIGHTS_WITH_VOLUME,
};
use crate::{OHLCVExt, OHLCV};

/// Scalar scores derived from a single bar.
///
/// Percentages are on a 0..100 scale; `body_to_range_ratio` is the same
/// quantity as `body_strength` on a 0..1 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthMetrics {
    pub body_size: f64,
    /// Body share of the total range, in percent
    pub body_strength: f64,
    pub upper_wick: f64,
    pub lower_wick: f64,
    pub total_range: f64,
    /// Volume relative to 1M, in percent, capped at 100
    pub volume_strength: f64,
    /// Body relative to the larger of open/close, in percent
    #[serde(deserialize_with = "nan_from_null")]
    pub momentum: f64,
    /// Range relative to the larger of open/close, in percent
    #[serde(deserialize_with = "nan_from_null")]
    pub volatility: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub overall_strength: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub overall_strength_without_volume: f64,
    pub body_to_range_ratio: f64,
}

impl StrengthMetrics {
    /// Composite score used to rank bars in the given mode.
    #[inline]
    pub fn score(&self, include_volume: bool) -> f64 {
        if include_volume {
            self.overall_strength
        } else {
            self.overall_strength_without_volume
        }
    }
}

/// serde_json writes NaN and infinity as `null`; read that back as NaN.
fn nan_from_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Compute every metric for one bar.
///
/// A zero-range bar scores 0 for body strength and volatility. A bar whose
/// open and close are both zero has no price base, so momentum, volatility and
/// both composites come out non-finite; that value is passed through as is.
pub fn compute_metrics<T: OHLCV + ?Sized>(bar: &T) -> StrengthMetrics {
    let body_size = bar.body();
    let total_range = bar.range();
    let base = bar.price_base();

    let body_to_range_ratio = bar.body_ratio();
    let body_strength = percent(body_to_range_ratio);
    let volume_strength = percent(bar.volume() / VOLUME_SATURATION).min(VOLUME_STRENGTH_CAP);
    let momentum = percent(body_size / base);
    let volatility = if total_range > 0.0 {
        percent(total_range / base)
    } else {
        0.0
    };

    let [w_body, w_momentum, w_volatility, w_volume] = WEIGHTS_WITH_VOLUME;
    let overall_strength = body_strength * w_body
        + momentum * w_momentum
        + volatility * w_volatility
        + volume_strength * w_volume;

    let [n_body, n_momentum, n_volatility] = WEIGHTS_WITHOUT_VOLUME;
    let overall_strength_without_volume =
        body_strength * n_body + momentum * n_momentum + volatility * n_volatility;

    StrengthMetrics {
        body_size,
        body_strength,
        upper_wick: bar.upper_wick(),
        lower_wick: bar.lower_wick(),
        total_range,
        volume_strength,
        momentum,
        volatility,
        overall_strength,
        overall_strength_without_volume,
        body_to_range_ratio,
    }
}
