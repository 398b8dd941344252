//! # Save Snapshots
//!
//! Everything needed to resume a run, kept apart from the live engine so a
//! load can overwrite the engine field by field.

use crate::game::{DeathType, Level, Player, TileKind};
use crate::{DungeonError, DungeonResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bumped whenever the snapshot layout changes.
pub const SAVE_VERSION: u32 = 1;

/// A full, serializable copy of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub level: Level,
    pub player: Player,
    pub difficulty: u32,
    pub level_number: u32,
    pub game_over: bool,
    pub death_type: DeathType,
    pub new_high_score: bool,
}

impl GameSnapshot {
    /// Saves the snapshot to JSON.
    pub fn to_json(&self) -> DungeonResult<String> {
        serde_json::to_string_pretty(self).map_err(DungeonError::from)
    }

    /// Loads and checks a snapshot from JSON.
    pub fn from_json(json: &str) -> DungeonResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Writes the snapshot to `path`, replacing any previous save.
    pub fn write_to(&self, path: &Path) -> DungeonResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads a snapshot from `path`.
    pub fn read_from(path: &Path) -> DungeonResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that the snapshot describes a state the engine can resume.
    pub fn validate(&self) -> DungeonResult<()> {
        if self.version != SAVE_VERSION {
            return Err(DungeonError::CorruptSave(format!(
                "save version {} is not supported (expected {})",
                self.version, SAVE_VERSION
            )));
        }

        let level = &self.level;
        if level.tiles.len() != level.size || level.tiles.iter().any(|row| row.len() != level.size) {
            return Err(DungeonError::CorruptSave(format!(
                "level grid is not {0}x{0}",
                level.size
            )));
        }

        let entry_ok = level
            .entry_position()
            .is_some_and(|pos| level.kind_at(pos) == Some(TileKind::Entry));
        let ladder_ok = level
            .ladder_position()
            .is_some_and(|pos| level.kind_at(pos) == Some(TileKind::Ladder));
        if !entry_ok || !ladder_ok {
            return Err(DungeonError::CorruptSave(
                "level is missing its entry or ladder".to_string(),
            ));
        }

        let player = self.player.position();
        let walkable = level
            .get_tile(player)
            .is_some_and(|tile| tile.is_walkable());
        if !walkable {
            return Err(DungeonError::CorruptSave(format!(
                "player position {} is not a floor tile",
                player
            )));
        }

        Ok(())
    }
}
