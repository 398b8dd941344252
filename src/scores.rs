//! # High Scores
//!
//! A short, ranked list of the best finished runs, kept on disk between
//! sessions.
//!
//! Losing runs end with a score of -1, so only wins ever reach the ledger.

use crate::{DungeonError, DungeonResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Format used when showing score dates.
pub const SCORE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Seam between the engine and whatever keeps its high scores.
pub trait ScoreHandler: std::fmt::Debug {
    /// Offers a finished run's score.
    ///
    /// Returns true when the score made it onto the list.
    fn add_score(&mut self, value: i32) -> bool;

    /// Ranked entries, best first.
    fn entries(&self) -> &[ScoreEntry];

    /// One line per entry: `#<rank> Score: <value> Date: <date>`.
    fn format_scores(&self) -> String {
        self.entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "#{} Score: {} Date: {}",
                    i + 1,
                    entry.value,
                    entry.date.format(SCORE_DATE_FORMAT)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single recorded score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub value: i32,
    pub date: NaiveDate,
}

impl ScoreEntry {
    /// Creates an entry dated today.
    pub fn today(value: i32) -> Self {
        Self {
            value,
            date: Local::now().date_naive(),
        }
    }
}

/// Ranked, capped high-score list, optionally backed by a file.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    path: Option<PathBuf>,
    max_store: usize,
    entries: Vec<ScoreEntry>,
}

impl ScoreLedger {
    /// Opens the ledger stored at `path`, keeping at most `max_store` entries.
    ///
    /// A missing or unreadable file gives an empty ledger.
    pub fn load(path: impl Into<PathBuf>, max_store: usize) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(DungeonError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No score file at {}, starting fresh", path.display());
                Vec::new()
            }
            Err(e) => {
                log::warn!("Could not load scores from {}: {}", path.display(), e);
                Vec::new()
            }
        };

        let mut ledger = Self {
            path: Some(path),
            max_store,
            entries,
        };
        ledger.rank_and_trim();
        ledger
    }

    /// A ledger that never touches the disk.
    pub fn in_memory(max_store: usize) -> Self {
        Self {
            path: None,
            max_store,
            entries: Vec::new(),
        }
    }

    /// Inserts an entry and reports its rank, before trimming.
    pub fn insert(&mut self, entry: ScoreEntry) -> usize {
        // Equal scores keep their age order: the newcomer ranks last among them.
        let rank = self.entries.partition_point(|e| e.value >= entry.value);
        self.entries.insert(rank, entry);
        rank
    }

    /// Writes the ledger to its file, if it has one.
    pub fn save(&self) -> DungeonResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn read_entries(path: &Path) -> DungeonResult<Vec<ScoreEntry>> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn rank_and_trim(&mut self) {
        self.entries.sort_by(|a, b| b.value.cmp(&a.value));
        self.entries.truncate(self.max_store);
    }
}

impl ScoreHandler for ScoreLedger {
    fn add_score(&mut self, value: i32) -> bool {
        if value <= 0 {
            return false;
        }

        let rank = self.insert(ScoreEntry::today(value));
        let is_high_score = rank < self.max_store;
        self.entries.truncate(self.max_store);

        if let Err(e) = self.save() {
            log::warn!("Could not save scores: {}", e);
        }

        is_high_score
    }

    fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}
