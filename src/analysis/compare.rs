//! Head-to-head comparison of two bars.
//!
//! Both bars are scored with [`compute_metrics`]; the winner is the strictly
//! higher composite, and each metric dimension where one side is strictly
//! ahead yields a human-readable advantage statement for that side.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::helpers::to_fixed;
use super::metrics::{compute_metrics, StrengthMetrics};
use crate::OHLCV;

/// Which side of a comparison came out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    First,
    Second,
    Tie,
}

impl Winner {
    /// Exact comparison, no tolerance. Unordered values (NaN) tie.
    pub fn decide(first: f64, second: f64) -> Self {
        if first > second {
            Winner::First
        } else if second > first {
            Winner::Second
        } else {
            Winner::Tie
        }
    }

    /// The same outcome seen with the sides swapped.
    pub fn swapped(self) -> Self {
        match self {
            Winner::First => Winner::Second,
            Winner::Second => Winner::First,
            Winner::Tie => Winner::Tie,
        }
    }
}

/// A value per side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sides<T> {
    pub first: T,
    pub second: T,
}

impl<T> Sides<T> {
    pub fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    pub fn get(&self, side: Winner) -> Option<&T> {
        match side {
            Winner::First => Some(&self.first),
            Winner::Second => Some(&self.second),
            Winner::Tie => None,
        }
    }

    fn get_mut(&mut self, side: Winner) -> Option<&mut T> {
        match side {
            Winner::First => Some(&mut self.first),
            Winner::Second => Some(&mut self.second),
            Winner::Tie => None,
        }
    }
}

/// Outcome of comparing two bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Winner under the mode the comparison was run with
    pub winner: Winner,
    /// Winner on the volume-free composite, whatever the mode
    pub winner_without_volume: Winner,
    pub metrics: Sides<StrengthMetrics>,
    pub advantages: Sides<Vec<String>>,
    /// `advantages` with every volume statement removed
    pub advantages_without_volume: Sides<Vec<String>>,
}

impl ComparisonResult {
    /// Winner to display for the given volume mode.
    pub fn active_winner(&self, include_volume: bool) -> Winner {
        if include_volume {
            self.winner
        } else {
            self.winner_without_volume
        }
    }

    /// Advantage list to display for the given volume mode.
    pub fn active_advantages(&self, include_volume: bool) -> &Sides<Vec<String>> {
        if include_volume {
            &self.advantages
        } else {
            &self.advantages_without_volume
        }
    }
}

// ============================================================
// ADVANTAGE DIMENSIONS
// ============================================================

/// One metric dimension the comparator reports on.
struct Dimension {
    value: fn(&StrengthMetrics) -> f64,
    describe: fn(f64, f64) -> String,
    volume: bool,
}

/// Fixed reporting order.
const DIMENSIONS: [Dimension; 5] = [
    Dimension {
        value: |m| m.body_strength,
        describe: |a, b| {
            format!("Stronger body dominance ({}% vs {}%)", to_fixed(a, 1), to_fixed(b, 1))
        },
        volume: false,
    },
    Dimension {
        value: |m| m.body_size,
        describe: |a, b| {
            format!("Larger absolute body size (${} vs ${})", to_fixed(a, 5), to_fixed(b, 5))
        },
        volume: false,
    },
    Dimension {
        value: |m| m.momentum,
        describe: |a, b| {
            format!("Higher momentum ({}% vs {}%)", to_fixed(a, 2), to_fixed(b, 2))
        },
        volume: false,
    },
    Dimension {
        value: |m| m.volume_strength,
        describe: |a, b| {
            format!("Higher volume support ({} vs {})", to_fixed(a, 1), to_fixed(b, 1))
        },
        volume: true,
    },
    Dimension {
        value: |m| m.volatility,
        describe: |a, b| {
            format!("Higher volatility ({}% vs {}%)", to_fixed(a, 2), to_fixed(b, 2))
        },
        volume: false,
    },
];

fn mentions_volume(statement: &str) -> bool {
    statement.contains("volume")
}

// ============================================================
// COMPARATOR
// ============================================================

/// Compare two bars.
///
/// `include_volume` picks the composite used for `winner` and whether the
/// volume dimension is reported; `winner_without_volume` always uses the
/// volume-free composite.
pub fn compare<A, B>(first: &A, second: &B, include_volume: bool) -> ComparisonResult
where
    A: OHLCV + ?Sized,
    B: OHLCV + ?Sized,
{
    let metrics = Sides::new(compute_metrics(first), compute_metrics(second));

    let winner = Winner::decide(
        metrics.first.score(include_volume),
        metrics.second.score(include_volume),
    );
    let winner_without_volume = Winner::decide(
        metrics.first.overall_strength_without_volume,
        metrics.second.overall_strength_without_volume,
    );

    tracing::trace!(
        first = metrics.first.score(include_volume),
        second = metrics.second.score(include_volume),
        include_volume,
        ?winner,
        "compared bars"
    );

    let mut advantages: Sides<Vec<String>> = Sides::default();
    for dim in DIMENSIONS.iter().filter(|d| include_volume || !d.volume) {
        let a = (dim.value)(&metrics.first);
        let b = (dim.value)(&metrics.second);
        let side = Winner::decide(a, b);
        if let Some(list) = advantages.get_mut(side) {
            let (ahead, behind) = if side == Winner::First { (a, b) } else { (b, a) };
            list.push((dim.describe)(ahead, behind));
        }
    }

    let filtered = |list: &[String]| -> Vec<String> {
        list.iter().filter(|s| !mentions_volume(s)).cloned().collect()
    };
    let advantages_without_volume =
        Sides::new(filtered(&advantages.first), filtered(&advantages.second));

    ComparisonResult {
        winner,
        winner_without_volume,
        metrics,
        advantages,
        advantages_without_volume,
    }
}

/// Compare many pairs in parallel. Output order follows input order.
pub fn compare_batch<'a, T, I>(pairs: I, include_volume: bool) -> Vec<ComparisonResult>
where
    T: OHLCV + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a T, &'a T)>,
{
    pairs
        .into_par_iter()
        .map(|(first, second)| compare(first, second, include_volume))
        .collect()
}

// ============================================================
// TESTS
// ============================================================
