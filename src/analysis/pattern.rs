//! Single-bar pattern classification
//!
//! Labels one bar from its own geometry: body, wicks and range. The rules form
//! an ordered decision list and the first match wins, because the categories
//! overlap (every marubozu also has a long body, every hammer a short one).

use std::fmt;
use std::str::FromStr;

use super::helpers::{
    is_doji, DOJI_LONG_WICK_FACTOR, LONG_BODY_RATIO, MARUBOZU_WICK_FACTOR, SHADOW_SHORT_FACTOR,
    SHADOW_VERYLONG_FACTOR, SHORT_BODY_RATIO, STRONG_BODY_RATIO,
};
use crate::{Direction, OHLCVExt, StrengthError, OHLCV};

/// Pattern label attached to a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    DragonflyDoji,
    GravestoneDoji,
    LongLeggedDoji,
    Doji,
    StrongBullishMarubozu,
    StrongBearishMarubozu,
    BullishMarubozu,
    BearishMarubozu,
    StrongBullish,
    StrongBearish,
    BullishHammer,
    HangingMan,
    InvertedHammer,
    ShootingStar,
    SpinningTop,
    Bullish,
    Bearish,
}

impl Pattern {
    pub const ALL: [Pattern; 17] = [
        Pattern::DragonflyDoji,
        Pattern::GravestoneDoji,
        Pattern::LongLeggedDoji,
        Pattern::Doji,
        Pattern::StrongBullishMarubozu,
        Pattern::StrongBearishMarubozu,
        Pattern::BullishMarubozu,
        Pattern::BearishMarubozu,
        Pattern::StrongBullish,
        Pattern::StrongBearish,
        Pattern::BullishHammer,
        Pattern::HangingMan,
        Pattern::InvertedHammer,
        Pattern::ShootingStar,
        Pattern::SpinningTop,
        Pattern::Bullish,
        Pattern::Bearish,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Pattern::DragonflyDoji => "Dragonfly Doji",
            Pattern::GravestoneDoji => "Gravestone Doji",
            Pattern::LongLeggedDoji => "Long-Legged Doji",
            Pattern::Doji => "Doji",
            Pattern::StrongBullishMarubozu => "Strong Bullish Marubozu",
            Pattern::StrongBearishMarubozu => "Strong Bearish Marubozu",
            Pattern::BullishMarubozu => "Bullish Marubozu",
            Pattern::BearishMarubozu => "Bearish Marubozu",
            Pattern::StrongBullish => "Strong Bullish",
            Pattern::StrongBearish => "Strong Bearish",
            Pattern::BullishHammer => "Bullish Hammer",
            Pattern::HangingMan => "Hanging Man",
            Pattern::InvertedHammer => "Inverted Hammer",
            Pattern::ShootingStar => "Shooting Star",
            Pattern::SpinningTop => "Spinning Top",
            Pattern::Bullish => "Bullish",
            Pattern::Bearish => "Bearish",
        }
    }

    /// Bias of the label. Doji variants and the spinning top carry none.
    pub fn direction(self) -> Direction {
        match self {
            Pattern::DragonflyDoji
            | Pattern::GravestoneDoji
            | Pattern::LongLeggedDoji
            | Pattern::Doji
            | Pattern::SpinningTop => Direction::Neutral,
            Pattern::StrongBullishMarubozu
            | Pattern::BullishMarubozu
            | Pattern::StrongBullish
            | Pattern::BullishHammer
            | Pattern::InvertedHammer
            | Pattern::Bullish => Direction::Bullish,
            Pattern::StrongBearishMarubozu
            | Pattern::BearishMarubozu
            | Pattern::StrongBearish
            | Pattern::HangingMan
            | Pattern::ShootingStar
            | Pattern::Bearish => Direction::Bearish,
        }
    }

    pub fn is_doji(self) -> bool {
        matches!(
            self,
            Pattern::DragonflyDoji | Pattern::GravestoneDoji | Pattern::LongLeggedDoji | Pattern::Doji
        )
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pattern {
    type Err = StrengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or(StrengthError::InvalidValue("unknown pattern label"))
    }
}

impl serde::Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}

impl<'de> serde::Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(d)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================
// CLASSIFIER
// ============================================================

/// Label a bar. Total over all inputs: every bar maps to exactly one pattern.
pub fn classify<T: OHLCV + ?Sized>(bar: &T) -> Pattern {
    let body = bar.body();
    let range = bar.range();
    let upper = bar.upper_wick();
    let lower = bar.lower_wick();
    let ratio = bar.body_ratio();
    let bullish = bar.is_bullish();

    let pick = |bull: Pattern, bear: Pattern| if bullish { bull } else { bear };

    if is_doji(body, range) {
        if upper > body * DOJI_LONG_WICK_FACTOR && lower < body {
            return Pattern::DragonflyDoji;
        }
        if lower > body * DOJI_LONG_WICK_FACTOR && upper < body {
            return Pattern::GravestoneDoji;
        }
        if upper > body * SHADOW_VERYLONG_FACTOR && lower > body * SHADOW_VERYLONG_FACTOR {
            return Pattern::LongLeggedDoji;
        }
        return Pattern::Doji;
    }

    if ratio > STRONG_BODY_RATIO {
        return pick(Pattern::StrongBullishMarubozu, Pattern::StrongBearishMarubozu);
    }

    if ratio > LONG_BODY_RATIO {
        if upper < body * MARUBOZU_WICK_FACTOR && lower < body * MARUBOZU_WICK_FACTOR {
            return pick(Pattern::BullishMarubozu, Pattern::BearishMarubozu);
        }
        return pick(Pattern::StrongBullish, Pattern::StrongBearish);
    }

    if upper > body * SHADOW_VERYLONG_FACTOR && lower < body * SHADOW_SHORT_FACTOR {
        return pick(Pattern::BullishHammer, Pattern::HangingMan);
    }

    if lower > body * SHADOW_VERYLONG_FACTOR && upper < body * SHADOW_SHORT_FACTOR {
        return pick(Pattern::InvertedHammer, Pattern::ShootingStar);
    }

    if ratio < SHORT_BODY_RATIO {
        return Pattern::SpinningTop;
    }

    pick(Pattern::Bullish, Pattern::Bearish)
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct B(f64, f64, f64, f64);

    impl OHLCV for B {
        fn open(&self) -> f64 {
            self.0
        }

        fn high(&self) -> f64 {
            self.1
        }

        fn low(&self) -> f64 {
            self.2
        }

        fn close(&self) -> f64 {
            self.3
        }

        fn volume(&self) -> f64 {
            0.0
        }
    }

    fn label(o: f64, h: f64, l: f64, c: f64) -> &'static str {
        classify(&B(o, h, l, c)).label()
    }

    #[test]
    fn test_flat_bar_is_doji() {
        assert_eq!(label(100.0, 100.0, 100.0, 100.0), "Doji");
    }

    #[test]
    fn test_doji_family() {
        // long upper wick, no lower wick
        assert_eq!(label(100.0, 110.0, 100.0, 100.05), "Dragonfly Doji");
        // long lower wick, no upper wick
        assert_eq!(label(100.0, 100.05, 90.0, 100.05), "Gravestone Doji");
        assert_eq!(label(100.0, 105.0, 95.0, 100.1), "Long-Legged Doji");
        // body under 10% of range but wicks too short for any variant
        assert_eq!(label(100.0, 100.9, 99.9, 100.08), "Doji");
    }

    #[test]
    fn test_marubozu_family() {
        assert_eq!(label(100.0, 110.0, 99.0, 109.0), "Strong Bullish Marubozu");
        assert_eq!(label(109.0, 110.0, 99.0, 100.0), "Strong Bearish Marubozu");
        // ratio 0.6, wicks 2 each (not < 0.3 * 6)
        assert_eq!(label(100.0, 108.0, 98.0, 106.0), "Strong Bullish");
        // ratio 0.67, wicks 1.5 each (< 0.3 * 6)
        assert_eq!(label(100.0, 107.5, 98.5, 106.0), "Bullish Marubozu");
        assert_eq!(label(106.0, 107.5, 98.5, 100.0), "Bearish Marubozu");
        assert_eq!(label(106.0, 108.0, 98.0, 100.0), "Strong Bearish");
    }

    #[test]
    fn test_hammer_family() {
        // upper wick 6 > 2*2, lower wick 0.5 < 0.5*2
        assert_eq!(label(100.0, 108.0, 99.5, 102.0), "Bullish Hammer");
        assert_eq!(label(102.0, 108.0, 99.5, 100.0), "Hanging Man");
        // lower wick 6 > 2*2, upper wick 0.5 < 0.5*2
        assert_eq!(label(106.0, 108.5, 100.0, 108.0), "Inverted Hammer");
        assert_eq!(label(108.0, 108.5, 100.0, 106.0), "Shooting Star");
    }

    #[test]
    fn test_spinning_top_and_plain() {
        // ratio 0.25
        assert_eq!(label(100.0, 106.0, 98.0, 102.0), "Spinning Top");
        // ratio 0.4, wicks 3 each
        assert_eq!(label(100.0, 107.0, 97.0, 104.0), "Bullish");
        assert_eq!(label(104.0, 107.0, 97.0, 100.0), "Bearish");
    }

    #[test]
    fn test_label_roundtrip() {
        for pattern in Pattern::ALL {
            assert_eq!(pattern.label().parse::<Pattern>().unwrap(), pattern);
            assert_eq!(pattern.to_string(), pattern.label());
        }
        assert!("Morning Star".parse::<Pattern>().is_err());
    }

    #[test]
    fn test_direction() {
        assert_eq!(Pattern::Doji.direction(), Direction::Neutral);
        assert_eq!(Pattern::SpinningTop.direction(), Direction::Neutral);
        assert!(Pattern::BullishHammer.direction().is_bullish());
        assert!(Pattern::ShootingStar.direction().is_bearish());
        assert!(Pattern::GravestoneDoji.is_doji());
        assert!(!Pattern::Bullish.is_doji());
    }
}
