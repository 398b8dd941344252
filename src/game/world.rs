//! # World Representation
//!
//! A level is a square grid of tiles with a wall border, one entry, one
//! ladder, and the random generator that everything random on the level
//! draws from.

use crate::game::{Position, Tile, TileKind};
use crate::{DungeonError, DungeonResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

fn fresh_rng() -> StdRng {
    StdRng::from_entropy()
}

/// One dungeon floor.
///
/// Tiles are stored row-major (`tiles[y][x]`). The generator is not part of
/// a save; a restored level gets a freshly seeded one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Level number, starting at 1
    pub number: u32,
    /// Difficulty the level was generated with
    pub difficulty: u32,
    /// Width and height in tiles
    pub size: usize,
    /// The tile grid, indexed `[y][x]`
    pub tiles: Vec<Vec<Tile>>,
    entry_position: Option<Position>,
    ladder_position: Option<Position>,
    #[serde(skip, default = "fresh_rng")]
    rng: StdRng,
}

impl Level {
    /// Creates a bordered room: `Empty` everywhere, `Wall` on the outer ring.
    ///
    /// No entry or ladder is placed; the generator (or a test) adds those.
    ///
    /// # Examples
    ///
    /// ```
    /// use mini_dungeon::{Level, Position, TileKind};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let level = Level::new(1, 0, 10, StdRng::seed_from_u64(7));
    /// assert_eq!(level.kind_at(Position::new(0, 0)), Some(TileKind::Wall));
    /// assert_eq!(level.kind_at(Position::new(4, 4)), Some(TileKind::Empty));
    /// ```
    pub fn new(number: u32, difficulty: u32, size: usize, rng: StdRng) -> Self {
        let mut tiles = vec![vec![Tile::Empty; size]; size];

        for (y, row) in tiles.iter_mut().enumerate() {
            for (x, tile) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x + 1 == size || y + 1 == size {
                    *tile = Tile::Wall;
                }
            }
        }

        Self {
            number,
            difficulty,
            size,
            tiles,
            entry_position: None,
            ladder_position: None,
            rng,
        }
    }

    /// Checks if a position lies on the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Checks if a position lies inside the wall ring.
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1
            && pos.y >= 1
            && (pos.x as usize) < self.size.saturating_sub(1)
            && (pos.y as usize) < self.size.saturating_sub(1)
    }

    /// Gets the tile at a position.
    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.tiles
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
    }

    /// Gets the tile at a position mutably.
    pub fn get_tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.tiles
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
    }

    /// Gets the kind of tile at a position.
    pub fn kind_at(&self, pos: Position) -> Option<TileKind> {
        self.get_tile(pos).map(Tile::kind)
    }

    /// Replaces the tile at a position.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> DungeonResult<()> {
        let slot = self.get_tile_mut(pos).ok_or_else(|| {
            DungeonError::InvalidAction(format!("{} is outside the level", pos))
        })?;
        *slot = tile;
        Ok(())
    }

    /// Where the player arrives on this level.
    pub fn entry_position(&self) -> Option<Position> {
        self.entry_position
    }

    /// Where this level's ladder stands.
    pub fn ladder_position(&self) -> Option<Position> {
        self.ladder_position
    }

    /// Places the entry, replacing any previous entry with `Empty`.
    pub fn set_entry_position(&mut self, pos: Position) -> DungeonResult<()> {
        self.ensure_interior(pos)?;
        if let Some(old) = self.entry_position.take() {
            if self.kind_at(old) == Some(TileKind::Entry) {
                self.set_tile(old, Tile::Empty)?;
            }
        }
        self.set_tile(pos, Tile::Entry)?;
        self.entry_position = Some(pos);
        Ok(())
    }

    /// Places the ladder, replacing any previous ladder with `Empty`.
    pub fn set_ladder_position(&mut self, pos: Position) -> DungeonResult<()> {
        self.ensure_interior(pos)?;
        if let Some(old) = self.ladder_position.take() {
            if self.kind_at(old) == Some(TileKind::Ladder) {
                self.set_tile(old, Tile::Empty)?;
            }
        }
        self.set_tile(pos, Tile::Ladder)?;
        self.ladder_position = Some(pos);
        Ok(())
    }

    /// Whether `pos` is this level's ladder.
    pub fn is_ladder(&self, pos: Position) -> bool {
        self.ladder_position == Some(pos)
    }

    /// Counts the tiles of a given kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| tile.kind() == kind)
            .count()
    }

    /// Number of cells inside the wall ring.
    pub fn interior_cells(&self) -> usize {
        self.size.saturating_sub(2).pow(2)
    }

    /// Picks a uniformly random interior position, or `None` when the walls
    /// leave no interior.
    pub fn random_interior_position(&mut self) -> Option<Position> {
        if self.interior_cells() == 0 {
            return None;
        }
        let upper = self.size as i32 - 1;
        let x = self.rng.gen_range(1..upper);
        let y = self.rng.gen_range(1..upper);
        Some(Position::new(x, y))
    }

    /// Picks random interior positions until one holds `Empty`.
    ///
    /// Returns `None` without sampling when no interior cell is empty.
    pub fn random_empty_position(&mut self) -> Option<Position> {
        let has_empty = self
            .interior_positions()
            .any(|pos| self.kind_at(pos) == Some(TileKind::Empty));
        if !has_empty {
            return None;
        }

        loop {
            let pos = self.random_interior_position()?;
            if self.kind_at(pos) == Some(TileKind::Empty) {
                return Some(pos);
            }
        }
    }

    fn interior_positions(&self) -> impl Iterator<Item = Position> {
        let inner = self.size.saturating_sub(1) as i32;
        (1..inner).flat_map(move |y| (1..inner).map(move |x| Position::new(x, y)))
    }

    /// Draws a seed for a follow-up level from this level's generator.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Resolves one volley from every ranged mutant still on the grid.
    ///
    /// Each mutant within range of `target` hits with its own chance; the
    /// total damage is returned. Mutants are never removed here.
    pub fn ranged_attack_damage(&mut self, target: Position) -> i32 {
        let mut damage = 0;

        for row in &self.tiles {
            for tile in row {
                if let Tile::RangedMutant {
                    position,
                    range,
                    hit_chance,
                    ..
                } = tile
                {
                    if position.in_range(target, *range)
                        && self.rng.gen_bool(hit_chance.clamp(0.0, 1.0))
                    {
                        log::debug!("Ranged mutant at {} hit the player at {}", position, target);
                        damage += crate::game::RANGED_DAMAGE;
                    }
                }
            }
        }

        damage
    }

    fn ensure_interior(&self, pos: Position) -> DungeonResult<()> {
        if self.is_interior(pos) {
            Ok(())
        } else {
            Err(DungeonError::InvalidAction(format!(
                "{} is not inside the level walls",
                pos
            )))
        }
    }
}
