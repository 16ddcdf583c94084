//! # barstrength - single-bar candlestick strength analysis
//!
//! Scores one OHLCV bar, labels it with a single-bar candlestick pattern and
//! compares two bars head to head, with and without volume weighting.
//!
//! ## Quick Start
//!
//! ```rust
//! use barstrength::prelude::*;
//!
//! let a = Bar::new("a", "Candle A", 100.0, 105.0, 95.0, 103.0, 2_000_000.0);
//! let b = Bar::new("b", "Candle B", 100.0, 101.0, 99.0, 100.2, 100_000.0);
//!
//! assert_eq!(a.pattern(), Some(Pattern::Bullish));
//!
//! let result = compare(&a, &b, true);
//! assert_eq!(result.winner, Winner::First);
//! assert_eq!(result.advantages.first.len(), 5);
//! assert_eq!(result.advantages_without_volume.first.len(), 4);
//! ```
//!
//! Synthetic bars come from a [`BarGenerator`](generator::BarGenerator) driven
//! by any [`rand::Rng`], so seeded runs are reproducible.

pub mod analysis;
pub mod bar;
pub mod export;
pub mod generator;
pub mod settings;
pub mod store;

pub mod prelude {
    pub use crate::{
        // Analysis
        analysis::*,
        // Data
        bar::Bar,
        // Export
        export::{share_text, Snapshot},
        // Generation
        generator::BarGenerator,
        settings::Settings,
        // Persistence
        store::{HistoryEntry, JsonFileStore, MemoryStore, Store, MAX_HISTORY_ITEMS},
        // Core traits
        Direction,
        OHLCVExt,
        Result,
        StrengthError,
        OHLCV,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, StrengthError>;

/// Errors raised by the settings, persistence and export layers.
///
/// Scoring itself never fails: every bar produces a metric set.
#[derive(Debug, thiserror::Error)]
pub enum StrengthError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================
// OHLCV TRAITS
// ============================================================

/// Core OHLCV data trait
pub trait OHLCV {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
    fn volume(&self) -> f64;
}

impl<T: OHLCV + ?Sized> OHLCV for &T {
    fn open(&self) -> f64 {
        (**self).open()
    }

    fn high(&self) -> f64 {
        (**self).high()
    }

    fn low(&self) -> f64 {
        (**self).low()
    }

    fn close(&self) -> f64 {
        (**self).close()
    }

    fn volume(&self) -> f64 {
        (**self).volume()
    }
}

/// Extension trait with the bar geometry every analysis step shares.
///
/// Nothing here validates `high >= max(open, close)`; wicks simply go
/// negative when the bar is malformed.
pub trait OHLCVExt: OHLCV {
    #[inline]
    fn body(&self) -> f64 {
        (self.close() - self.open()).abs()
    }

    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    #[inline]
    fn upper_wick(&self) -> f64 {
        self.high() - self.open().max(self.close())
    }

    #[inline]
    fn lower_wick(&self) -> f64 {
        self.open().min(self.close()) - self.low()
    }

    /// Larger of open and close, the denominator for momentum and volatility.
    #[inline]
    fn price_base(&self) -> f64 {
        self.open().max(self.close())
    }

    #[inline]
    fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    #[inline]
    fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }

    /// Body as a fraction of range, `0.0` for a zero-range bar.
    #[inline]
    fn body_ratio(&self) -> f64 {
        let range = self.range();
        if range > 0.0 {
            self.body() / range
        } else {
            0.0
        }
    }
}

impl<T: OHLCV + ?Sized> OHLCVExt for T {}

/// Direction/bias of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Bullish,
    Neutral,
    Bearish,
}

impl Direction {
    #[inline]
    pub fn is_bullish(self) -> bool {
        matches!(self, Direction::Bullish)
    }

    #[inline]
    pub fn is_bearish(self) -> bool {
        matches!(self, Direction::Bearish)
    }
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Raw {
        o: f64,
        h: f64,
        l: f64,
        c: f64,
    }

    impl OHLCV for Raw {
        fn open(&self) -> f64 {
            self.o
        }

        fn high(&self) -> f64 {
            self.h
        }

        fn low(&self) -> f64 {
            self.l
        }

        fn close(&self) -> f64 {
            self.c
        }

        fn volume(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_ohlcv_ext() {
        let bar = Raw {
            o: 100.0,
            h: 110.0,
            l: 90.0,
            c: 105.0,
        };
        assert_eq!(bar.body(), 5.0);
        assert_eq!(bar.range(), 20.0);
        assert_eq!(bar.upper_wick(), 5.0);
        assert_eq!(bar.lower_wick(), 10.0);
        assert_eq!(bar.price_base(), 105.0);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert!((bar.body_ratio() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_body_ratio_zero_range() {
        let bar = Raw {
            o: 50.0,
            h: 50.0,
            l: 50.0,
            c: 50.0,
        };
        assert_eq!(bar.body_ratio(), 0.0);
    }

    #[test]
    fn test_malformed_bar_gives_negative_wicks() {
        let bar = Raw {
            o: 100.0,
            h: 99.0,
            l: 101.0,
            c: 100.0,
        };
        assert!(bar.upper_wick() < 0.0);
        assert!(bar.lower_wick() < 0.0);
    }

    #[test]
    fn test_reference_forwarding() {
        let bar = Raw {
            o: 1.0,
            h: 3.0,
            l: 0.5,
            c: 2.0,
        };
        let by_ref: &dyn OHLCV = &bar;
        assert_eq!(by_ref.body(), 1.0);
        assert_eq!((&bar).range(), 2.5);
    }

    #[test]
    fn test_error_display() {
        let err = StrengthError::OutOfRange {
            field: "base_price",
            value: -1.0,
            min: 0.0,
            max: f64::MAX,
        };
        assert!(err.to_string().starts_with("base_price = -1"));
    }
}
