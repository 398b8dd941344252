//! # Tiles
//!
//! The closed set of things a grid cell can hold, and what happens when the
//! player steps onto one.

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// Score awarded for picking up gold.
pub const GOLD_SCORE: i32 = 2;
/// Health restored by a potion.
pub const POTION_HEAL: i32 = 4;
/// Damage dealt each time the player steps on a trap.
pub const TRAP_DAMAGE: i32 = 2;
/// Contact damage taken when fighting a melee mutant.
pub const MELEE_DAMAGE: i32 = 2;
/// Score awarded for defeating any mutant.
pub const MUTANT_SCORE: i32 = 2;
/// Damage dealt by one ranged hit.
pub const RANGED_DAMAGE: i32 = 2;
/// How far (Manhattan) a ranged mutant can shoot.
pub const RANGED_RANGE: u32 = 2;
/// Chance that a ranged mutant in range hits the player each turn.
pub const RANGED_HIT_CHANCE: f64 = 0.5;

/// Symbol drawn in place of the tile the player stands on.
pub const PLAYER_SYMBOL: char = 'P';

/// Data-less tag for each tile variant.
///
/// Used wherever the variant matters but its state does not: placement
/// tables, counting, and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Empty,
    Entry,
    Ladder,
    Gold,
    HealthPotion,
    Trap,
    MeleeMutant,
    RangedMutant,
}

/// The contents of one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tile {
    /// Impassable border
    Wall,
    /// Bare floor
    Empty,
    /// Where the player arrives on a level
    Entry,
    /// Leads to the next level, or out of the dungeon on the last one
    Ladder,
    Gold,
    HealthPotion,
    /// Hurts on every contact and is never used up
    Trap,
    /// Fights back on contact; removed once beaten
    MeleeMutant { defeated: bool },
    /// Shoots at the player from `position` while in range
    RangedMutant {
        position: Position,
        range: u32,
        hit_chance: f64,
        defeated: bool,
    },
}

/// The effect of stepping onto an interactive tile.
///
/// The engine applies `damage` (when `can_damage`), `heal` and `score` to the
/// player and clears the cell when `remove_on_use` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub narration: String,
    pub remove_on_use: bool,
    pub can_damage: bool,
    pub damage: i32,
    pub heal: i32,
    pub score: i32,
}

impl Interaction {
    /// An interaction that only tells the player something.
    pub fn narrate(narration: impl Into<String>) -> Self {
        Self {
            narration: narration.into(),
            remove_on_use: false,
            can_damage: false,
            damage: 0,
            heal: 0,
            score: 0,
        }
    }

    /// A one-shot pickup that disappears after use.
    fn collectable(narration: impl Into<String>, heal: i32, score: i32) -> Self {
        Self {
            remove_on_use: true,
            heal,
            score,
            ..Self::narrate(narration)
        }
    }

    /// A fight that leaves the mutant defeated.
    fn battle(narration: impl Into<String>, damage: i32, defeated: bool) -> Self {
        Self {
            remove_on_use: defeated,
            can_damage: true,
            damage,
            score: MUTANT_SCORE,
            ..Self::narrate(narration)
        }
    }
}

impl Tile {
    /// Creates an undefeated melee mutant.
    pub fn melee_mutant() -> Self {
        Tile::MeleeMutant { defeated: false }
    }

    /// Creates an undefeated ranged mutant that shoots from `position`.
    pub fn ranged_mutant(position: Position) -> Self {
        Tile::RangedMutant {
            position,
            range: RANGED_RANGE,
            hit_chance: RANGED_HIT_CHANCE,
            defeated: false,
        }
    }

    /// Returns the tag for this tile.
    pub fn kind(&self) -> TileKind {
        match self {
            Tile::Wall => TileKind::Wall,
            Tile::Empty => TileKind::Empty,
            Tile::Entry => TileKind::Entry,
            Tile::Ladder => TileKind::Ladder,
            Tile::Gold => TileKind::Gold,
            Tile::HealthPotion => TileKind::HealthPotion,
            Tile::Trap => TileKind::Trap,
            Tile::MeleeMutant { .. } => TileKind::MeleeMutant,
            Tile::RangedMutant { .. } => TileKind::RangedMutant,
        }
    }

    /// Character used to draw this tile.
    pub fn symbol(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Empty => '.',
            Tile::Entry => 'E',
            Tile::Ladder => 'L',
            Tile::Gold => 'G',
            Tile::HealthPotion => 'H',
            Tile::Trap => 'T',
            Tile::MeleeMutant { .. } => 'M',
            Tile::RangedMutant { .. } => 'R',
        }
    }

    /// Whether the player may step onto this tile.
    pub fn is_walkable(&self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// Whether this is a mutant that has already been beaten.
    pub fn is_defeated(&self) -> bool {
        match self {
            Tile::MeleeMutant { defeated } | Tile::RangedMutant { defeated, .. } => *defeated,
            _ => false,
        }
    }

    /// Resolves the player stepping onto this tile.
    ///
    /// Mutants are marked defeated here, which is what makes them removable.
    /// Returns `None` for tiles without an interaction.
    pub fn interact(&mut self) -> Option<Interaction> {
        match self {
            Tile::Wall | Tile::Empty => None,
            Tile::Entry => Some(Interaction::narrate(
                "You peer into the level above, didn't you just come down?",
            )),
            Tile::Ladder => Some(Interaction::narrate("You found a ladder!")),
            Tile::Gold => Some(Interaction::collectable(
                format!("You found some gold! Score increased by {}.", GOLD_SCORE),
                0,
                GOLD_SCORE,
            )),
            Tile::HealthPotion => Some(Interaction::collectable(
                format!("You found a health potion! You recovered {} HP.", POTION_HEAL),
                POTION_HEAL,
                0,
            )),
            Tile::Trap => Some(Interaction {
                can_damage: true,
                damage: TRAP_DAMAGE,
                ..Interaction::narrate(format!(
                    "You fell for a trap and lost {} HP.",
                    TRAP_DAMAGE
                ))
            }),
            Tile::MeleeMutant { defeated } => {
                *defeated = true;
                Some(Interaction::battle(
                    format!(
                        "You attacked a melee mutant! You lost {} HP in the battle but emerged victorious.",
                        MELEE_DAMAGE
                    ),
                    MELEE_DAMAGE,
                    *defeated,
                ))
            }
            Tile::RangedMutant { defeated, .. } => {
                *defeated = true;
                Some(Interaction::battle("Ranged mutant down!", 0, *defeated))
            }
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}
