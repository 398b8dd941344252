//! # Item Placement
//!
//! Collectables and hazards scattered on every level.

use crate::game::{Position, Tile, TileKind};
use crate::generation::{GenerationConfig, Placement};

fn gold(_: Position) -> Tile {
    Tile::Gold
}

fn health_potion(_: Position) -> Tile {
    Tile::HealthPotion
}

fn trap(_: Position) -> Tile {
    Tile::Trap
}

/// Gold, health potions and traps, in placement order.
pub fn item_placements(config: &GenerationConfig) -> Vec<Placement> {
    vec![
        Placement::new(TileKind::Gold, config.gold_count, gold),
        Placement::new(TileKind::HealthPotion, config.health_potion_count, health_potion),
        Placement::new(TileKind::Trap, config.trap_count, trap),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_counts_ignore_difficulty() {
        let easy = item_placements(&GenerationConfig::new(1, 0));
        let hard = item_placements(&GenerationConfig::new(2, 10));
        let counts = |table: &[Placement]| table.iter().map(|p| p.count).collect::<Vec<_>>();
        assert_eq!(counts(&easy[..]), vec![5, 2, 5]);
        assert_eq!(counts(&easy[..]), counts(&hard[..]));
    }
}
