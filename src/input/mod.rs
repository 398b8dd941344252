//! # Input Module
//!
//! Input handling and command parsing for the console driver.

pub mod commands;

pub use commands::*;

use crate::game::GameEngine;

/// Turns typed lines into [`PlayerInput`] and runs them against an engine.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to accept Vi-style movement keys (j and k)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use mini_dungeon::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse_line(" Up "), PlayerInput::Move(Direction::Up));
    /// assert_eq!(input_handler.parse_line("k"), PlayerInput::Move(Direction::Up));
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one line of console input. Case and surrounding whitespace
    /// are ignored.
    pub fn parse_line(&self, line: &str) -> PlayerInput {
        let word = line.trim().to_lowercase();

        if let Some(input) = command_for_word(&word) {
            return input;
        }
        if self.vi_keys_enabled {
            if let Some(direction) = vi_direction(&word) {
                return PlayerInput::Move(direction);
            }
        }

        PlayerInput::Unknown(line.trim().to_string())
    }

    /// Runs an engine command and returns the text to show for it.
    ///
    /// Returns `None` for inputs the driver handles itself (help, quit).
    pub fn apply(&self, input: &PlayerInput, engine: &mut GameEngine) -> Option<String> {
        match input {
            PlayerInput::Move(direction) => Some(engine.process_move(*direction)),
            PlayerInput::Save => Some(engine.save_game()),
            PlayerInput::Scores => {
                let scores = engine.high_scores();
                Some(if scores.is_empty() {
                    "No high scores yet.".to_string()
                } else {
                    scores
                })
            }
            PlayerInput::Unknown(text) => {
                log::debug!("Unrecognised input {:?}", text);
                Some("Invalid move.".to_string())
            }
            PlayerInput::Help | PlayerInput::Quit => None,
        }
    }
}
