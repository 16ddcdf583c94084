//! User-facing analysis settings.

use serde::{Deserialize, Serialize};

use crate::{Result, StrengthError};

pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Settings record shared by the generator, comparator callers and stores.
///
/// Missing keys fall back to their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Rank bars on the volume-weighted composite
    pub include_volume: bool,
    /// Open the second generated bar at the first bar's close
    pub auto_link_candles: bool,
    /// Opening price for generated bars
    pub base_price: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_volume: true,
            auto_link_candles: false,
            base_price: DEFAULT_BASE_PRICE,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if !self.base_price.is_finite() {
            return Err(StrengthError::InvalidValue(
                "base_price cannot be NaN or infinite",
            ));
        }
        if self.base_price <= 0.0 {
            return Err(StrengthError::OutOfRange {
                field: "base_price",
                value: self.base_price,
                min: 0.0,
                max: f64::MAX,
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
