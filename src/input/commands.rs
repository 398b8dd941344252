//! # Command Definitions
//!
//! The words a console player can type, and what each one means.

use crate::game::Direction;

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one step in a direction
    Move(Direction),
    /// Save the run to the configured save file
    Save,
    /// Show the high-score list
    Scores,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
    /// Anything that isn't a command; carries the original text
    Unknown(String),
}

/// Looks up a single, already lowercased word.
///
/// Only keys that never clash with another command live here; the vi keys
/// are handled by [`crate::input::InputHandler`] so they can be switched off.
pub fn command_for_word(word: &str) -> Option<PlayerInput> {
    let input = match word {
        "u" | "up" | "w" => PlayerInput::Move(Direction::Up),
        "d" | "down" => PlayerInput::Move(Direction::Down),
        "l" | "left" | "a" => PlayerInput::Move(Direction::Left),
        "r" | "right" => PlayerInput::Move(Direction::Right),
        "s" | "save" => PlayerInput::Save,
        "scores" | "highscores" => PlayerInput::Scores,
        "h" | "help" | "?" => PlayerInput::Help,
        "q" | "quit" | "exit" => PlayerInput::Quit,
        _ => return None,
    };
    Some(input)
}

/// Vi-style movement keys.
pub fn vi_direction(word: &str) -> Option<Direction> {
    match word {
        "k" => Some(Direction::Up),
        "j" => Some(Direction::Down),
        _ => None,
    }
}
