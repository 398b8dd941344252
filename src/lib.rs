//! # Mini Dungeon
//!
//! A small, turn-based grid dungeon crawler.
//!
//! ## Architecture Overview
//!
//! The crate is the game core only. Front ends drive it through a handful of
//! commands and render the text it hands back:
//!
//! - **Game**: positions, tiles, levels, the player and the [`GameEngine`]
//!   that resolves one turn at a time
//! - **Generation**: bordered-room level generation with a placement table
//! - **Scores**: the ranked, persisted high-score ledger
//! - **Rendering**: plain-text views of the map and player status
//! - **Input**: console command parsing for line-oriented drivers
//!
//! Every move returns a narration string. That string is the only channel
//! through which a front end learns what happened during a turn.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scores;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scores::*;

/// Core error type for the dungeon engine.
#[derive(thiserror::Error, Debug)]
pub enum DungeonError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A save file was readable but its contents can't be restored
    #[error("Corrupt save: {0}")]
    CorruptSave(String),
}

/// Result type used throughout the crate.
pub type DungeonResult<T> = Result<T, DungeonError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Width and height of every level, walls included
    pub const LEVEL_SIZE: usize = 10;

    /// Player starting (and maximum) health
    pub const MAX_HP: i32 = 10;

    /// Step budget for a whole run
    pub const MAX_STEPS: u32 = 100;

    /// Highest difficulty accepted when a run starts
    pub const MAX_DIFFICULTY: u32 = 10;

    /// Difficulty used when a driver has nothing better
    pub const DEFAULT_DIFFICULTY: u32 = 3;

    /// Difficulty added when the player descends a level
    pub const DIFFICULTY_STEP: u32 = 2;

    /// Number of the last floor; its ladder is the dungeon exit
    pub const FINAL_LEVEL: u32 = 2;

    /// Number of entries the high-score ledger keeps
    pub const MAX_STORED_SCORES: usize = 5;

    /// Default run-save file
    pub const DEFAULT_SAVE_PATH: &str = "md_saves.json";

    /// Default high-score file
    pub const DEFAULT_SCORE_PATH: &str = "md_highscores.json";
}
