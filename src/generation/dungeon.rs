//! # Dungeon Generation
//!
//! Builds a level as one walled room with scattered contents.
//!
//! The generator works in a fixed order:
//! 1. Fill the grid with floor and wall off the outer ring
//! 2. Place the entry (fixed corner, or the previous level's ladder)
//! 3. Place the ladder on a random empty interior cell
//! 4. Walk the placement table, dropping each tile on a random empty cell
//!
//! Every random pick is rejection sampling on empty cells, so nothing ever
//! lands on a wall, the entry, the ladder or an earlier item.

use crate::game::{Level, Position, TileKind};
use crate::generation::{placement_table, GenerationConfig, Generator};
use crate::{DungeonError, DungeonResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator for single-room dungeon levels.
#[derive(Debug, Clone, Default)]
pub struct RoomGenerator;

impl RoomGenerator {
    /// Creates a new room generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use mini_dungeon::{GenerationConfig, Generator, RoomGenerator, TileKind};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let generator = RoomGenerator::new();
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let level = generator.generate(&GenerationConfig::new(1, 3), &mut rng).unwrap();
    /// assert_eq!(level.count(TileKind::RangedMutant), 3);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Refuses configurations whose contents can't all fit inside the walls.
    fn check_capacity(&self, config: &GenerationConfig) -> DungeonResult<()> {
        if config.size < 3 {
            return Err(DungeonError::GenerationFailed(format!(
                "level size {} leaves no room inside the walls",
                config.size
            )));
        }

        let interior = (config.size - 2).pow(2);
        // entry + ladder + everything in the placement table
        let needed = config.total_items() + 2;
        if needed > interior {
            return Err(DungeonError::GenerationFailed(format!(
                "{} tiles to place but only {} interior cells",
                needed, interior
            )));
        }

        Ok(())
    }

    fn place_entry(&self, level: &mut Level, config: &GenerationConfig) -> DungeonResult<()> {
        let entry = config.entry.unwrap_or_else(|| config.default_entry());
        level.set_entry_position(entry).map_err(|_| {
            DungeonError::GenerationFailed(format!("entry {} is not inside the walls", entry))
        })
    }

    fn empty_cell(&self, level: &mut Level) -> DungeonResult<Position> {
        level.random_empty_position().ok_or_else(|| {
            DungeonError::GenerationFailed("no empty interior cell left".to_string())
        })
    }

    fn place_ladder(&self, level: &mut Level) -> DungeonResult<()> {
        let ladder = self.empty_cell(level)?;
        level.set_ladder_position(ladder)
    }

    fn place_contents(&self, level: &mut Level, config: &GenerationConfig) -> DungeonResult<()> {
        for placement in placement_table(config) {
            for _ in 0..placement.count {
                let pos = self.empty_cell(level)?;
                level.set_tile(pos, placement.build(pos))?;
            }
        }
        Ok(())
    }

    fn validate_border(&self, level: &Level) -> DungeonResult<()> {
        for (y, row) in level.tiles.iter().enumerate() {
            if row.len() != level.size {
                return Err(DungeonError::GenerationFailed(format!(
                    "row {} has {} tiles, expected {}",
                    y,
                    row.len(),
                    level.size
                )));
            }
            for (x, tile) in row.iter().enumerate() {
                let border = x == 0 || y == 0 || x + 1 == level.size || y + 1 == level.size;
                if border != (tile.kind() == TileKind::Wall) {
                    return Err(DungeonError::GenerationFailed(format!(
                        "unexpected {:?} at ({}, {})",
                        tile.kind(),
                        x,
                        y
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Generator<Level> for RoomGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<Level> {
        self.check_capacity(config)?;

        let level_rng = StdRng::seed_from_u64(rng.gen());
        let mut level = Level::new(config.level_number, config.difficulty, config.size, level_rng);

        self.place_entry(&mut level, config)?;
        self.place_ladder(&mut level)?;
        self.place_contents(&mut level, config)?;
        self.validate(&level, config)?;

        log::debug!(
            "Generated level {} (difficulty {}): entry {:?}, ladder {:?}",
            level.number,
            level.difficulty,
            level.entry_position(),
            level.ladder_position()
        );

        Ok(level)
    }

    fn validate(&self, level: &Level, config: &GenerationConfig) -> DungeonResult<()> {
        self.validate_border(level)?;

        for kind in [TileKind::Entry, TileKind::Ladder] {
            let count = level.count(kind);
            if count != 1 {
                return Err(DungeonError::GenerationFailed(format!(
                    "expected exactly one {:?}, found {}",
                    kind, count
                )));
            }
        }

        for placement in placement_table(config) {
            let count = level.count(placement.kind);
            if count != placement.count as usize {
                return Err(DungeonError::GenerationFailed(format!(
                    "expected {} {:?}, found {}",
                    placement.count, placement.kind, count
                )));
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomGenerator"
    }
}
