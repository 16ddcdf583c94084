//! Comparison history and settings persistence
//!
//! The [`Store`] trait is the narrow interface callers persist through:
//! a most-recent-first history capped at [`MAX_HISTORY_ITEMS`] entries plus a
//! single settings record. Two implementations are provided:
//!
//! - [`MemoryStore`] - process-local, nothing survives a restart
//! - [`JsonFileStore`] - `history.json` and `settings.json` in one directory

use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::analysis::ComparisonResult;
use crate::bar::Bar;
use crate::settings::Settings;
use crate::Result;

/// Oldest entries are evicted beyond this many.
pub const MAX_HISTORY_ITEMS: usize = 50;

const HISTORY_FILE: &str = "history.json";
const SETTINGS_FILE: &str = "settings.json";

/// One recorded comparison with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub first_candle: Bar,
    pub second_candle: Bar,
    pub result: ComparisonResult,
    pub include_volume: bool,
}

impl HistoryEntry {
    pub fn new(
        id: impl Into<String>,
        first_candle: Bar,
        second_candle: Bar,
        result: ComparisonResult,
        include_volume: bool,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: Utc::now(),
            first_candle,
            second_candle,
            result,
            include_volume,
        }
    }
}

/// Persistence for comparison history and settings.
pub trait Store {
    /// Record a comparison as the newest entry, evicting the oldest past the cap.
    fn push_history(&mut self, entry: HistoryEntry) -> Result<()>;

    /// All entries, newest first.
    fn history(&self) -> Result<Vec<HistoryEntry>>;

    fn clear_history(&mut self) -> Result<()>;

    /// Validate and persist the settings record.
    fn save_settings(&mut self, settings: &Settings) -> Result<()>;

    /// Stored settings, or the defaults when none were saved.
    fn settings(&self) -> Result<Settings>;
}

// ============================================================
// MEMORY STORE
// ============================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    history: VecDeque<HistoryEntry>,
    settings: Option<Settings>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn push_history(&mut self, entry: HistoryEntry) -> Result<()> {
        tracing::debug!(id = %entry.id, "recording comparison");
        self.history.push_front(entry);
        self.history.truncate(MAX_HISTORY_ITEMS);
        Ok(())
    }

    fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.history.iter().cloned().collect())
    }

    fn clear_history(&mut self) -> Result<()> {
        tracing::debug!(dropped = self.history.len(), "clearing history");
        self.history.clear();
        Ok(())
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        settings.validate()?;
        self.settings = Some(*settings);
        Ok(())
    }

    fn settings(&self) -> Result<Settings> {
        Ok(self.settings.unwrap_or_default())
    }
}

// ============================================================
// JSON FILE STORE
// ============================================================

/// File-backed store writing pretty-printed JSON.
///
/// A missing file reads as empty history / default settings. A file that no
/// longer parses is logged and read the same way, so one corrupt write does
/// not lock the caller out. Any other I/O failure is returned.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        let path = self.path(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable store file");
                Ok(None)
            },
        }
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path(file), json)?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn push_history(&mut self, entry: HistoryEntry) -> Result<()> {
        tracing::debug!(id = %entry.id, dir = %self.dir.display(), "recording comparison");
        let mut history = self.history()?;
        history.insert(0, entry);
        history.truncate(MAX_HISTORY_ITEMS);
        self.write(HISTORY_FILE, &history)
    }

    fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.read(HISTORY_FILE)?.unwrap_or_default())
    }

    fn clear_history(&mut self) -> Result<()> {
        tracing::debug!(dir = %self.dir.display(), "clearing history");
        match fs::remove_file(self.path(HISTORY_FILE)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        settings.validate()?;
        tracing::debug!(?settings, "saving settings");
        self.write(SETTINGS_FILE, settings)
    }

    fn settings(&self) -> Result<Settings> {
        Ok(self.read(SETTINGS_FILE)?.unwrap_or_default())
    }
}

// ============================================================
// TESTS
// ============================================================
