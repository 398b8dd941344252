//! # Encounter Placement
//!
//! Mutants placed on a level. Melee mutants come in a fixed number; there
//! is one ranged mutant per point of difficulty.

use crate::game::{Position, Tile, TileKind};
use crate::generation::{GenerationConfig, Placement};

fn melee_mutant(_: Position) -> Tile {
    Tile::melee_mutant()
}

/// Ranged mutants remember where they stand so they can aim from there.
fn ranged_mutant(position: Position) -> Tile {
    Tile::ranged_mutant(position)
}

/// Melee then ranged mutants, in placement order.
pub fn encounter_placements(config: &GenerationConfig) -> Vec<Placement> {
    vec![
        Placement::new(TileKind::MeleeMutant, config.melee_mutant_count, melee_mutant),
        Placement::new(
            TileKind::RangedMutant,
            config.ranged_mutant_count(),
            ranged_mutant,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ranged_mutants_at_difficulty_zero() {
        let table = encounter_placements(&GenerationConfig::new(1, 0));
        assert_eq!(table[0].count, 3);
        assert_eq!(table[1].count, 0);
    }

    #[test]
    fn test_ranged_mutant_records_its_position() {
        let table = encounter_placements(&GenerationConfig::new(1, 2));
        let pos = Position::new(6, 2);
        match table[1].build(pos) {
            Tile::RangedMutant { position, .. } => assert_eq!(position, pos),
            other => panic!("expected a ranged mutant, got {:?}", other),
        }
    }
}
