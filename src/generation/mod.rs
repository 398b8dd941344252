//! # Generation Module
//!
//! Procedural level generation.
//!
//! Levels are a single walled room. Generation places the entry, a ladder
//! and a fixed mix of items and mutants; only the number of ranged mutants
//! grows with difficulty. What gets placed, and how often, comes from a
//! placement table built out of the item and encounter lists.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::game::{Position, Tile, TileKind};
use crate::DungeonResult;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for generating one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of the level being generated, starting at 1
    pub level_number: u32,
    /// Difficulty; equals the number of ranged mutants placed
    pub difficulty: u32,
    /// Width and height of the level, walls included
    pub size: usize,
    /// Forced entry position (the previous level's ladder)
    pub entry: Option<Position>,
    pub gold_count: u32,
    pub health_potion_count: u32,
    pub trap_count: u32,
    pub melee_mutant_count: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration for a level.
    ///
    /// # Examples
    ///
    /// ```
    /// use mini_dungeon::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(1, 3);
    /// assert_eq!(config.size, 10);
    /// assert_eq!(config.ranged_mutant_count(), 3);
    /// assert_eq!(config.total_items(), 18);
    /// ```
    pub fn new(level_number: u32, difficulty: u32) -> Self {
        Self {
            level_number,
            difficulty,
            size: crate::config::LEVEL_SIZE,
            entry: None,
            gold_count: 5,
            health_potion_count: 2,
            trap_count: 5,
            melee_mutant_count: 3,
        }
    }

    /// Sets the level size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Forces the entry to a position.
    pub fn with_entry(mut self, entry: Position) -> Self {
        self.entry = Some(entry);
        self
    }

    pub fn ranged_mutant_count(&self) -> u32 {
        self.difficulty
    }

    /// Total number of items and mutants to place.
    pub fn total_items(&self) -> usize {
        placement_table(self)
            .iter()
            .map(|placement| placement.count as usize)
            .sum()
    }

    /// Entry used when none is forced: bottom-left, one tile in from the walls.
    pub fn default_entry(&self) -> Position {
        Position::new(1, self.size as i32 - 2)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(1, crate::config::DEFAULT_DIFFICULTY)
    }
}

/// One row of the placement table: how many tiles of a kind to scatter,
/// and how to build one at a given position.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub kind: TileKind,
    pub count: u32,
    pub factory: fn(Position) -> Tile,
}

impl Placement {
    pub fn new(kind: TileKind, count: u32, factory: fn(Position) -> Tile) -> Self {
        Self {
            kind,
            count,
            factory,
        }
    }

    /// Builds the tile for `position`.
    pub fn build(&self, position: Position) -> Tile {
        (self.factory)(position)
    }
}

/// The full placement table for a level, in placement order.
pub fn placement_table(config: &GenerationConfig) -> Vec<Placement> {
    let mut table = item_placements(config);
    table.extend(encounter_placements(config));
    table
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DungeonResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}
