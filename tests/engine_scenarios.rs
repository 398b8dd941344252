//! Integration tests for turn resolution on a hand-built control map.

use mini_dungeon::{
    DeathType, EngineConfig, GameEngine, Level, Position, ScoreHandler, ScoreLedger, Tile,
    TileKind,
};
use rand::{rngs::StdRng, SeedableRng};

fn seeded_engine(difficulty: i32, seed: u64) -> GameEngine {
    GameEngine::with_config(
        difficulty,
        EngineConfig::default(),
        Box::new(ScoreLedger::in_memory(5)),
        StdRng::seed_from_u64(seed),
    )
    .expect("engine should start")
}

/// Bare 10x10 room with the entry at (1, 8) and the ladder at (6, 5).
fn walk_level() -> Level {
    let mut level = Level::new(1, 0, 10, StdRng::seed_from_u64(77));
    level.set_entry_position(Position::new(1, 8)).unwrap();
    level.set_ladder_position(Position::new(6, 5)).unwrap();
    level
}

/// Entry (1,8), gold (1,7), trap (1,6), melee mutant (1,5), potion (2,5),
/// ranged mutant (5,5) and ladder (6,5).
fn control_level(ranged_hit_chance: f64) -> Level {
    let mut level = walk_level();
    level.set_tile(Position::new(1, 7), Tile::Gold).unwrap();
    level.set_tile(Position::new(1, 6), Tile::Trap).unwrap();
    level.set_tile(Position::new(1, 5), Tile::melee_mutant()).unwrap();
    level.set_tile(Position::new(2, 5), Tile::HealthPotion).unwrap();

    let ranged = Position::new(5, 5);
    level
        .set_tile(
            ranged,
            Tile::RangedMutant {
                position: ranged,
                range: 2,
                hit_chance: ranged_hit_chance,
                defeated: false,
            },
        )
        .unwrap();
    level
}

fn engine_on(level: Level) -> GameEngine {
    let mut engine = seeded_engine(0, 1);
    *engine.current_level_mut() = level;
    engine.player_mut().start_at(Position::new(1, 8));
    engine
}

fn control_engine() -> GameEngine {
    engine_on(control_level(0.0))
}

#[test]
fn test_control_map() {
    let engine = control_engine();
    let level = engine.current_level();

    for i in 0..10 {
        for pos in [
            Position::new(i, 0),
            Position::new(i, 9),
            Position::new(0, i),
            Position::new(9, i),
        ] {
            assert_eq!(level.kind_at(pos), Some(TileKind::Wall), "wall missing at {}", pos);
        }
    }

    let expected = [
        ((1, 8), TileKind::Entry),
        ((1, 7), TileKind::Gold),
        ((1, 6), TileKind::Trap),
        ((1, 5), TileKind::MeleeMutant),
        ((2, 5), TileKind::HealthPotion),
        ((5, 5), TileKind::RangedMutant),
        ((6, 5), TileKind::Ladder),
    ];
    for ((x, y), kind) in expected {
        assert_eq!(level.kind_at(Position::new(x, y)), Some(kind));
    }

    assert_eq!(engine.player().position(), Position::new(1, 8));
}

#[test]
fn test_initial_state() {
    let engine = seeded_engine(3, 2024);
    assert_eq!(engine.size(), 10);
    assert_eq!(engine.grid().len(), 10);
    assert!(!engine.is_game_over());
    assert_eq!(engine.death_type(), DeathType::None);
    assert_eq!(engine.player().hp(), 10);
    assert_eq!(engine.player().steps(), 0);
    assert_eq!(engine.player().score(), 0);
}

#[test]
fn test_movement() {
    let mut engine = engine_on(walk_level());
    engine.player_mut().start_at(Position::new(4, 7));

    engine.move_up();
    assert_eq!(engine.player().position(), Position::new(4, 6));
    engine.move_right();
    assert_eq!(engine.player().position(), Position::new(5, 6));
    engine.move_down();
    assert_eq!(engine.player().position(), Position::new(5, 7));
    engine.move_left();
    assert_eq!(engine.player().position(), Position::new(4, 7));
    assert_eq!(engine.player().steps(), 4);
}

#[test]
fn test_moving_towards_a_boundary_hits_a_wall() {
    let mut engine = seeded_engine(0, 31);
    let hit_wall = (0..10).any(|_| engine.move_up().contains("hit a wall"));
    assert!(hit_wall, "walking up should reach the top wall");
    assert!(engine.player().position().y >= 1);
}

#[test]
fn test_wall_bump_is_free() {
    let mut engine = control_engine();
    let before = engine.snapshot();

    let result = engine.move_down();
    assert!(result.contains("hit a wall"));
    assert_eq!(engine.player(), &before.player);
    assert_eq!(engine.grid(), &before.level.tiles[..]);
}

#[test]
fn test_move_named() {
    let mut engine = control_engine();
    assert_eq!(engine.move_named("north"), "Invalid move.");
    assert_eq!(engine.player().steps(), 0);

    let result = engine.move_named("Right");
    assert!(result.starts_with("Moved right one step."));
    assert_eq!(engine.player().position(), Position::new(2, 8));
}

#[test]
fn test_gold() {
    let mut engine = control_engine();
    let result = engine.move_up();

    assert!(result.contains("Score increased by 2"));
    assert_eq!(engine.player().score(), 2);
    assert_eq!(
        engine.current_level().kind_at(Position::new(1, 7)),
        Some(TileKind::Empty)
    );
}

#[test]
fn test_trap_stays_and_retriggers() {
    let mut engine = control_engine();
    engine.player_mut().start_at(Position::new(1, 7));

    engine.move_up();
    assert_eq!(engine.player().hp(), 8);
    assert_eq!(
        engine.current_level().kind_at(Position::new(1, 6)),
        Some(TileKind::Trap)
    );

    engine.move_down();
    engine.move_up();
    assert_eq!(engine.player().hp(), 6);
}

#[test]
fn test_melee_mutant() {
    let mut engine = control_engine();
    engine.player_mut().start_at(Position::new(1, 6));

    let result = engine.move_up();
    assert!(result.contains("melee mutant"));
    assert_eq!(engine.player().hp(), 8);
    assert_eq!(engine.player().score(), 2);
    assert_eq!(
        engine.current_level().kind_at(Position::new(1, 5)),
        Some(TileKind::Empty)
    );
}

#[test]
fn test_health_potion_heals_up_to_max() {
    let mut engine = control_engine();
    engine.player_mut().start_at(Position::new(1, 5));
    engine.player_mut().hurt(4);

    engine.move_right();
    assert_eq!(engine.player().hp(), 10);
    assert_eq!(
        engine.current_level().kind_at(Position::new(2, 5)),
        Some(TileKind::Empty)
    );

    engine.player_mut().set_hp(8);
    engine.move_left();
    engine
        .current_level_mut()
        .set_tile(Position::new(2, 5), Tile::HealthPotion)
        .unwrap();
    engine.move_right();
    assert_eq!(engine.player().hp(), 10);
}

#[test]
fn test_ranged_mutant_shoots_then_falls() {
    let mut engine = engine_on(control_level(1.0));
    engine.player_mut().start_at(Position::new(3, 5));

    let result = engine.move_right();
    assert!(result.contains("arrows"));
    assert_eq!(engine.player().hp(), 8);

    let result = engine.move_right();
    assert!(result.contains("Ranged mutant down!"));
    assert!(!result.contains("arrows"));
    assert_eq!(engine.player().score(), 2);
    assert_eq!(engine.player().hp(), 8);
    assert_eq!(
        engine.current_level().kind_at(Position::new(5, 5)),
        Some(TileKind::Empty)
    );
}

#[test]
fn test_ranged_mutant_out_of_range_is_harmless() {
    let mut engine = engine_on(control_level(1.0));
    engine.player_mut().start_at(Position::new(5, 8));

    let result = engine.move_up();
    assert_eq!(engine.player().position(), Position::new(5, 7));
    assert!(result.contains("arrows"), "distance 2 is still in range");

    let result = engine.move_down();
    assert!(!result.contains("arrows"));
    assert_eq!(engine.player().hp(), 8);
}

#[test]
fn test_ladder_leads_to_level_two() {
    let mut engine = control_engine();
    engine.player_mut().start_at(Position::new(5, 5));

    let result = engine.move_right();
    assert!(result.contains("level 2"));
    assert_eq!(engine.level_number(), 2);
    assert_eq!(engine.difficulty(), 2);
    assert_eq!(engine.current_level().difficulty, 2);
    assert_eq!(engine.current_level().number, 2);

    let ladder = Position::new(6, 5);
    assert_eq!(engine.player().position(), ladder);
    assert_eq!(engine.current_level().entry_position(), Some(ladder));
    assert_eq!(engine.current_level().kind_at(ladder), Some(TileKind::Entry));
    assert_ne!(engine.current_level().ladder_position(), Some(ladder));
    assert_eq!(engine.current_level().count(TileKind::RangedMutant), 2);
    assert_eq!(engine.player().steps(), 1);
}

#[test]
fn test_game_complete() {
    let mut engine = control_engine();
    engine.set_level_number(2);
    engine.player_mut().start_at(Position::new(5, 5));

    let result = engine.move_right();
    assert!(engine.is_game_over());
    assert!(result.contains("win"));
    assert_eq!(engine.death_type(), DeathType::None);

    // A zero score never reaches the ledger.
    assert!(!engine.is_new_high_score());
    assert!(engine.scores().entries().is_empty());
}

#[test]
fn test_winning_run_is_recorded() {
    let mut engine = control_engine();
    engine.set_level_number(2);

    engine.move_up();
    engine.player_mut().start_at(Position::new(5, 5));
    let result = engine.move_right();

    assert!(result.contains("Congratulations! You got a new high score!"));
    assert!(engine.is_new_high_score());
    assert_eq!(engine.scores().entries()[0].value, 2);
    assert!(engine.high_scores().starts_with("#1 Score: 2 Date: "));
}

#[test]
fn test_game_over_on_zero_hp() {
    let mut engine = control_engine();
    engine.player_mut().hurt(10);

    engine.move_right();
    assert!(engine.is_game_over());
    assert_eq!(engine.death_type(), DeathType::NoHp);
    assert_eq!(engine.player().score(), -1);
}

#[test]
fn test_max_steps() {
    let mut engine = engine_on(walk_level());
    engine.player_mut().start_at(Position::new(4, 7));

    for _ in 0..49 {
        engine.move_left();
        engine.move_right();
    }
    assert_eq!(engine.player().steps(), 98);
    assert!(!engine.is_game_over());

    engine.move_left();
    engine.move_right();
    assert_eq!(engine.player().steps(), 100);
    assert!(engine.is_game_over());
    assert_eq!(engine.death_type(), DeathType::MaxSteps);
    assert_eq!(engine.player().score(), -1);
}

#[test]
fn test_health_loss_wins_over_step_loss() {
    let mut level = walk_level();
    level.set_tile(Position::new(2, 8), Tile::Trap).unwrap();
    let mut engine = engine_on(level);
    engine.player_mut().set_steps(99);
    engine.player_mut().set_hp(2);

    engine.move_right();
    assert_eq!(engine.death_type(), DeathType::NoHp);
}

#[test]
fn test_same_seed_same_run() {
    let mut a = seeded_engine(6, 555);
    let mut b = seeded_engine(6, 555);
    assert_eq!(a.grid(), b.grid());

    for _ in 0..5 {
        assert_eq!(a.move_right(), b.move_right());
        assert_eq!(a.move_up(), b.move_up());
    }
    assert_eq!(a.player(), b.player());
}
