//! # Game Engine
//!
//! Turn resolution and run bookkeeping.
//!
//! The [`GameEngine`] owns the active level, the player, the score ledger and
//! the run flags. Front ends only ever call the command methods below and
//! print the narration they return; all rule decisions (level transitions,
//! wins, deaths, score commits) are made here.

use crate::game::{Direction, GameSnapshot, Level, Player, Tile, TileKind, SAVE_VERSION};
use crate::generation::{GenerationConfig, Generator, RoomGenerator};
use crate::scores::{ScoreHandler, ScoreLedger};
use crate::{config, DungeonError, DungeonResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Why a run ended in defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeathType {
    /// Still alive, or the run was won
    #[default]
    None,
    /// Health reached zero
    NoHp,
    /// The step budget ran out
    MaxSteps,
}

/// Tunables for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub level_size: usize,
    pub max_hp: i32,
    pub max_steps: u32,
    /// Number of the last level; its ladder ends the run
    pub final_level: u32,
    /// Difficulty added on every level transition
    pub difficulty_step: u32,
    pub save_path: PathBuf,
    pub score_path: PathBuf,
    pub max_scores: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level_size: config::LEVEL_SIZE,
            max_hp: config::MAX_HP,
            max_steps: config::MAX_STEPS,
            final_level: config::FINAL_LEVEL,
            difficulty_step: config::DIFFICULTY_STEP,
            save_path: PathBuf::from(config::DEFAULT_SAVE_PATH),
            score_path: PathBuf::from(config::DEFAULT_SCORE_PATH),
            max_scores: config::MAX_STORED_SCORES,
        }
    }
}

/// Runs a single game from the first level to a win or a death.
#[derive(Debug)]
pub struct GameEngine {
    level: Level,
    player: Player,
    difficulty: u32,
    level_number: u32,
    game_over: bool,
    death_type: DeathType,
    new_high_score: bool,
    scores: Box<dyn ScoreHandler>,
    config: EngineConfig,
    generator: RoomGenerator,
}

impl GameEngine {
    /// Starts a run with the default configuration, the on-disk score
    /// ledger and an entropy-seeded generator.
    pub fn new(difficulty: i32) -> DungeonResult<Self> {
        let config = EngineConfig::default();
        let scores = ScoreLedger::load(config.score_path.clone(), config.max_scores);
        Self::with_config(difficulty, config, Box::new(scores), StdRng::from_entropy())
    }

    /// Starts a run with explicit collaborators.
    ///
    /// Difficulty is clamped to `0..=10`. The first level is generated from
    /// `rng`, so the same seed always yields the same run.
    ///
    /// # Examples
    ///
    /// ```
    /// use mini_dungeon::{EngineConfig, GameEngine, ScoreLedger};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let engine = GameEngine::with_config(
    ///     42,
    ///     EngineConfig::default(),
    ///     Box::new(ScoreLedger::in_memory(5)),
    ///     StdRng::seed_from_u64(7),
    /// )
    /// .unwrap();
    /// assert_eq!(engine.difficulty(), 10);
    /// assert_eq!(engine.level_number(), 1);
    /// assert_eq!(engine.player().hp(), 10);
    /// ```
    pub fn with_config(
        difficulty: i32,
        config: EngineConfig,
        scores: Box<dyn ScoreHandler>,
        mut rng: StdRng,
    ) -> DungeonResult<Self> {
        let difficulty = difficulty.clamp(0, config::MAX_DIFFICULTY as i32) as u32;
        let generator = RoomGenerator::new();

        let gen_config = GenerationConfig::new(1, difficulty).with_size(config.level_size);
        let level = generator.generate(&gen_config, &mut rng)?;
        let entry = level.entry_position().ok_or_else(|| {
            DungeonError::InvalidState("generated level has no entry".to_string())
        })?;

        let mut player = Player::new(config.max_hp, config.max_steps);
        player.start_at(entry);

        log::info!("Starting a new run at difficulty {}", difficulty);

        Ok(Self {
            level,
            player,
            difficulty,
            level_number: 1,
            game_over: false,
            death_type: DeathType::None,
            new_high_score: false,
            scores,
            config,
            generator,
        })
    }

    pub fn move_up(&mut self) -> String {
        self.process_move(Direction::Up)
    }

    pub fn move_down(&mut self) -> String {
        self.process_move(Direction::Down)
    }

    pub fn move_left(&mut self) -> String {
        self.process_move(Direction::Left)
    }

    pub fn move_right(&mut self) -> String {
        self.process_move(Direction::Right)
    }

    /// Moves by direction name; unknown names change nothing.
    pub fn move_named(&mut self, name: &str) -> String {
        match name.parse::<Direction>() {
            Ok(direction) => self.process_move(direction),
            Err(_) => "Invalid move.".to_string(),
        }
    }

    /// Resolves one turn and returns its narration.
    ///
    /// The engine does not refuse moves once the run is over; drivers are
    /// expected to stop asking.
    pub fn process_move(&mut self, direction: Direction) -> String {
        let target = self.player.position().step(direction);

        let walkable = self.level.get_tile(target).is_some_and(Tile::is_walkable);
        if !walkable {
            log::debug!("Blocked moving {} into {}", direction, target);
            return format!("You tried to move {} but hit a wall.", direction);
        }

        self.player.step_to(target);
        let mut output = format!("Moved {} one step.", direction);

        let interaction = self.level.get_tile_mut(target).and_then(Tile::interact);
        if let Some(interaction) = interaction {
            output.push(' ');
            output.push_str(&self.player.apply_interaction(&interaction));

            if interaction.remove_on_use {
                if let Err(e) = self.level.set_tile(target, Tile::Empty) {
                    log::error!("Could not clear {}: {}", target, e);
                }
            }
        }

        if self.level.is_ladder(target) {
            self.climb_ladder(&mut output);
            return output;
        }

        let damage = self.level.ranged_attack_damage(target);
        if damage > 0 {
            self.player.hurt(damage);
            output.push_str(&format!(
                " A flurry of arrows approached you and dealt {} damage, ouch!",
                damage
            ));
        }

        self.check_game_over(&mut output);
        log::debug!(
            "Turn {}: hp {}, score {}, at {}",
            self.player.steps(),
            self.player.hp(),
            self.player.score(),
            self.player.position()
        );

        output
    }

    fn climb_ladder(&mut self, output: &mut String) {
        if self.level_number < self.config.final_level {
            match self.advance_level() {
                Ok(()) => output.push_str(&format!(" Moving onto level {}.", self.level_number)),
                Err(e) => log::error!("Could not generate level {}: {}", self.level_number + 1, e),
            }
            return;
        }

        self.game_over = true;
        output.push_str(" Hey, that's the exit to the dungeon! You win!");
        log::info!("Run won with a score of {}", self.player.score());

        self.new_high_score = self.scores.add_score(self.player.score());
        if self.new_high_score {
            output.push_str(" Congratulations! You got a new high score!");
        }
    }

    /// Replaces the level with the next one, entered at the old ladder.
    fn advance_level(&mut self) -> DungeonResult<()> {
        let ladder = self.level.ladder_position().ok_or_else(|| {
            DungeonError::InvalidState("current level has no ladder".to_string())
        })?;

        let number = self.level_number + 1;
        let difficulty = self.difficulty + self.config.difficulty_step;
        let gen_config = GenerationConfig::new(number, difficulty)
            .with_size(self.config.level_size)
            .with_entry(ladder);

        let mut rng = StdRng::seed_from_u64(self.level.next_seed());
        self.level = self.generator.generate(&gen_config, &mut rng)?;
        self.level_number = number;
        self.difficulty = difficulty;
        self.player.start_at(ladder);

        log::info!("Descended to level {} (difficulty {})", number, difficulty);
        Ok(())
    }

    fn check_game_over(&mut self, output: &mut String) {
        let death = if !self.player.is_alive() {
            DeathType::NoHp
        } else if self.player.steps_exhausted() {
            DeathType::MaxSteps
        } else {
            return;
        };

        self.game_over = true;
        self.death_type = death;
        self.player.set_score(-1);

        output.push_str(match death {
            DeathType::NoHp => " You have run out of health.",
            _ => " You are too exhausted to take another step.",
        });
        log::info!("Run lost: {:?}", death);
    }

    /// Captures everything needed to resume this run.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SAVE_VERSION,
            level: self.level.clone(),
            player: self.player.clone(),
            difficulty: self.difficulty,
            level_number: self.level_number,
            game_over: self.game_over,
            death_type: self.death_type,
            new_high_score: self.new_high_score,
        }
    }

    /// Overwrites the run with a snapshot.
    ///
    /// The snapshot is checked first; on error the engine is left untouched.
    pub fn apply_snapshot(&mut self, snapshot: GameSnapshot) -> DungeonResult<()> {
        snapshot.validate()?;

        self.level = snapshot.level;
        self.player.restore_from(&snapshot.player);
        self.difficulty = snapshot.difficulty;
        self.level_number = snapshot.level_number;
        self.game_over = snapshot.game_over;
        self.death_type = snapshot.death_type;
        self.new_high_score = snapshot.new_high_score;
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> DungeonResult<()> {
        self.snapshot().write_to(path)?;
        log::info!("Saved run to {}", path.display());
        Ok(())
    }

    pub fn load_from(&mut self, path: &Path) -> DungeonResult<()> {
        let snapshot = GameSnapshot::read_from(path)?;
        self.apply_snapshot(snapshot)?;
        log::info!("Loaded run from {}", path.display());
        Ok(())
    }

    /// Saves to the configured save file.
    pub fn save_game(&self) -> String {
        match self.save_to(&self.config.save_path) {
            Ok(()) => "Game saved!".to_string(),
            Err(e) => {
                log::error!("Save failed: {}", e);
                format!("Error saving game: {}", e)
            }
        }
    }

    /// Loads the configured save file. Returns false, leaving the run as it
    /// was, when there is no usable save.
    pub fn load_game(&mut self) -> bool {
        if !self.save_exists() {
            return false;
        }

        let path = self.config.save_path.clone();
        match self.load_from(&path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not load {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn save_exists(&self) -> bool {
        self.config.save_path.is_file()
    }

    pub fn current_level(&self) -> &Level {
        &self.level
    }

    pub fn current_level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// The tile grid, indexed `[y][x]`.
    pub fn grid(&self) -> &[Vec<Tile>] {
        &self.level.tiles
    }

    pub fn size(&self) -> usize {
        self.level.size
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn death_type(&self) -> DeathType {
        self.death_type
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    /// Relabels the current level; used to set up scenarios on a final floor.
    pub fn set_level_number(&mut self, level_number: u32) {
        self.level_number = level_number;
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Formatted high-score list.
    pub fn high_scores(&self) -> String {
        self.scores.format_scores()
    }

    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn scores(&self) -> &dyn ScoreHandler {
        self.scores.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the tile under the player is of `kind`.
    pub fn standing_on(&self, kind: TileKind) -> bool {
        self.level.kind_at(self.player.position()) == Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    fn seeded_engine(difficulty: i32, seed: u64) -> GameEngine {
        GameEngine::with_config(
            difficulty,
            EngineConfig::default(),
            Box::new(ScoreLedger::in_memory(5)),
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    /// Bare room with the entry at (1, 8) and the ladder at `ladder`.
    fn bare_level(number: u32, ladder: Position) -> Level {
        let mut level = Level::new(number, 0, 10, StdRng::seed_from_u64(3));
        level.set_entry_position(Position::new(1, 8)).unwrap();
        level.set_ladder_position(ladder).unwrap();
        level
    }

    fn engine_on(level: Level) -> GameEngine {
        let mut engine = seeded_engine(0, 1);
        *engine.current_level_mut() = level;
        engine.player_mut().start_at(Position::new(1, 8));
        engine
    }

    #[test]
    fn test_new_run_starts_at_entry() {
        let engine = seeded_engine(3, 11);
        assert_eq!(engine.level_number(), 1);
        assert_eq!(engine.difficulty(), 3);
        assert_eq!(engine.size(), 10);
        assert_eq!(engine.player().position(), Position::new(1, 8));
        assert!(engine.standing_on(TileKind::Entry));
        assert!(!engine.is_game_over());
        assert_eq!(engine.death_type(), DeathType::None);
    }

    #[test]
    fn test_difficulty_is_clamped() {
        assert_eq!(seeded_engine(-4, 1).difficulty(), 0);
        assert_eq!(seeded_engine(99, 1).difficulty(), 10);
    }

    #[test]
    fn test_wall_bump_changes_nothing() {
        let mut engine = engine_on(bare_level(1, Position::new(6, 5)));
        let result = engine.move_left();
        assert!(result.contains("hit a wall"));
        assert_eq!(engine.player().position(), Position::new(1, 8));
        assert_eq!(engine.player().steps(), 0);
    }

    #[test]
    fn test_invalid_move_name() {
        let mut engine = engine_on(bare_level(1, Position::new(6, 5)));
        assert_eq!(engine.move_named("sideways"), "Invalid move.");
        assert_eq!(engine.player().steps(), 0);
        assert!(engine.move_named("UP").starts_with("Moved up one step."));
    }

    #[test]
    fn test_gold_is_collected_once() {
        let mut level = bare_level(1, Position::new(6, 5));
        level.set_tile(Position::new(1, 7), Tile::Gold).unwrap();
        let mut engine = engine_on(level);

        let result = engine.move_up();
        assert!(result.contains("gold"));
        assert_eq!(engine.player().score(), 2);
        assert_eq!(engine.player().steps(), 1);
        assert!(engine.standing_on(TileKind::Empty));
    }

    #[test]
    fn test_trap_kills_and_scores_minus_one() {
        let mut level = bare_level(1, Position::new(6, 5));
        level.set_tile(Position::new(1, 7), Tile::Trap).unwrap();
        let mut engine = engine_on(level);
        engine.player_mut().set_hp(2);
        engine.player_mut().set_score(8);

        engine.move_up();
        assert!(engine.is_game_over());
        assert_eq!(engine.death_type(), DeathType::NoHp);
        assert_eq!(engine.player().hp(), 0);
        assert_eq!(engine.player().score(), -1);
        assert!(engine.standing_on(TileKind::Trap));
    }

    #[test]
    fn test_last_step_ends_the_run() {
        let mut engine = engine_on(bare_level(1, Position::new(6, 5)));
        engine.player_mut().set_steps(99);

        engine.move_right();
        assert!(engine.is_game_over());
        assert_eq!(engine.death_type(), DeathType::MaxSteps);
        assert_eq!(engine.player().score(), -1);
    }

    #[test]
    fn test_ladder_moves_to_next_level() {
        let mut engine = engine_on(bare_level(1, Position::new(2, 8)));
        let result = engine.move_right();

        assert!(result.contains("Moving onto level 2."));
        assert_eq!(engine.level_number(), 2);
        assert_eq!(engine.difficulty(), 2);
        assert_eq!(engine.player().position(), Position::new(2, 8));
        assert_eq!(engine.current_level().entry_position(), Some(Position::new(2, 8)));
        assert!(engine.standing_on(TileKind::Entry));
        assert_eq!(engine.current_level().count(TileKind::RangedMutant), 2);
        assert!(!engine.is_game_over());
    }

    #[test]
    fn test_final_ladder_wins() {
        let mut level = bare_level(2, Position::new(2, 8));
        level.set_tile(Position::new(1, 7), Tile::Gold).unwrap();
        let mut engine = engine_on(level);
        engine.set_level_number(2);

        engine.move_up();
        engine.move_down();
        let result = engine.move_right();

        assert!(result.contains("You win!"));
        assert!(result.contains("new high score"));
        assert!(engine.is_game_over());
        assert_eq!(engine.death_type(), DeathType::None);
        assert!(engine.is_new_high_score());
        assert_eq!(engine.scores().entries()[0].value, 2);
        assert!(engine.high_scores().starts_with("#1 Score: 2 Date: "));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut engine = seeded_engine(4, 21);
        engine.move_right();
        engine.move_up();
        let snapshot = engine.snapshot();

        let mut other = seeded_engine(1, 99);
        other.apply_snapshot(snapshot.clone()).unwrap();
        assert_eq!(other.player(), engine.player());
        assert_eq!(other.grid(), engine.grid());
        assert_eq!(other.difficulty(), 4);
        assert_eq!(other.level_number(), 1);
    }

    #[test]
    fn test_bad_snapshot_leaves_engine_alone() {
        let mut engine = seeded_engine(2, 5);
        let before = engine.snapshot();

        let mut broken = before.clone();
        broken.version = SAVE_VERSION + 1;
        assert!(matches!(
            engine.apply_snapshot(broken),
            Err(DungeonError::CorruptSave(_))
        ));

        let mut off_map = before.clone();
        off_map.player.start_at(Position::new(40, 40));
        assert!(engine.apply_snapshot(off_map).is_err());

        assert_eq!(engine.player(), &before.player);
        assert_eq!(engine.grid(), &before.level.tiles[..]);
    }
}
