//! Portable snapshot export and share text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{ComparisonResult, Sides, Winner};
use crate::bar::Bar;
use crate::settings::Settings;
use crate::Result;

/// Everything needed to reproduce a comparison elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub settings: Settings,
    pub candles: Sides<Bar>,
    pub comparison: ComparisonResult,
}

impl Snapshot {
    pub fn new(settings: Settings, first: Bar, second: Bar, comparison: ComparisonResult) -> Self {
        Self {
            timestamp: Utc::now(),
            settings,
            candles: Sides::new(first, second),
            comparison,
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Plain-text summary naming the winner for the given volume mode.
pub fn share_text(
    first: &Bar,
    second: &Bar,
    result: &ComparisonResult,
    include_volume: bool,
) -> String {
    let winner = match result.active_winner(include_volume) {
        Winner::First => first.name.as_str(),
        Winner::Second => second.name.as_str(),
        Winner::Tie => "Tie",
    };
    let mode = if include_volume { "With" } else { "Without" };
    format!(
        "Candlestick Strength Comparison\nWinner: {winner}\n{} vs {}\nAnalysis: {mode} Volume",
        first.name, second.name
    )
}
