//! # Player
//!
//! Health, score, step budget and position of the adventurer.

use crate::game::{Interaction, Position};
use serde::{Deserialize, Serialize};

/// The player character.
///
/// Health and steps only change through clamping setters, so
/// `0 <= hp <= max_hp` and `0 <= steps <= max_steps` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    hp: i32,
    max_hp: i32,
    score: i32,
    steps: u32,
    max_steps: u32,
    position: Position,
}

impl Player {
    /// Creates a player at full health with no steps taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use mini_dungeon::Player;
    ///
    /// let player = Player::new(10, 100);
    /// assert_eq!(player.hp(), 10);
    /// assert_eq!(player.steps(), 0);
    /// assert_eq!(player.score(), 0);
    /// ```
    pub fn new(max_hp: i32, max_steps: u32) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            hp: max_hp,
            max_hp,
            score: 0,
            steps: 0,
            max_steps,
            position: Position::new(0, 0),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Current position, by value.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Places the player without spending a step (level start, transitions).
    pub fn start_at(&mut self, position: Position) {
        self.position = position;
    }

    /// Moves the player to an adjacent cell, spending one step.
    pub fn step_to(&mut self, position: Position) {
        self.position = position;
        self.set_steps(self.steps.saturating_add(1));
    }

    /// Sets health, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Sets the step count, clamped to `[0, max_steps]`.
    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps.min(self.max_steps);
    }

    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    pub fn hurt(&mut self, amount: i32) {
        self.set_hp(self.hp.saturating_sub(amount));
    }

    pub fn heal(&mut self, amount: i32) {
        self.set_hp(self.hp.saturating_add(amount));
    }

    pub fn add_score(&mut self, amount: i32) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Whether the step budget is used up.
    pub fn steps_exhausted(&self) -> bool {
        self.steps >= self.max_steps
    }

    /// Applies a resolved interaction and returns its narration.
    pub fn apply_interaction(&mut self, interaction: &Interaction) -> String {
        if interaction.can_damage && interaction.damage > 0 {
            self.hurt(interaction.damage);
        }
        if interaction.heal > 0 {
            self.heal(interaction.heal);
        }
        if interaction.score > 0 {
            self.add_score(interaction.score);
        }
        interaction.narration.clone()
    }

    /// Copies the run state of `other` onto this player.
    ///
    /// Limits stay as they are; hp and steps are re-clamped against them.
    pub fn restore_from(&mut self, other: &Player) {
        self.set_hp(other.hp);
        self.score = other.score;
        self.set_steps(other.steps);
        self.position = other.position;
    }
}
