//! The bar value type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{classify, Pattern};
use crate::OHLCV;

/// One OHLCV observation with a caller-assigned identity.
///
/// Bars are values: the `with_*` methods return a new bar and never touch
/// `self`. Any change to open/high/low/close re-runs the classifier so the
/// cached pattern always describes the current prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub id: String,
    pub name: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, rename = "patternName", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
}

impl Bar {
    /// Build a bar and attach its pattern label.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            open,
            high,
            low,
            close,
            volume,
            timestamp: None,
            pattern: None,
        }
        .classified()
    }

    #[inline]
    pub fn pattern(&self) -> Option<Pattern> {
        self.pattern
    }

    /// Copy with the pattern label recomputed from the current prices.
    pub fn classified(self) -> Self {
        let pattern = classify(&self);
        Self {
            pattern: Some(pattern),
            ..self
        }
    }

    pub fn with_ohlc(&self, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            ..self.clone()
        }
        .classified()
    }

    /// Copy with a new open, as used when chaining a bar onto the previous close.
    pub fn with_open(&self, open: f64) -> Self {
        self.with_ohlc(open, self.high, self.low, self.close)
    }

    pub fn with_volume(&self, volume: f64) -> Self {
        Self {
            volume,
            ..self.clone()
        }
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_timestamp(&self, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..self.clone()
        }
    }
}

impl OHLCV for Bar {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}
