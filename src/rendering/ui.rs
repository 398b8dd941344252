//! # User Interface Elements
//!
//! Status panel, game-over banner and help text.

use crate::game::{DeathType, GameEngine};

/// Key reference shown by the console driver.
pub const HELP_TEXT: &str = "\
Commands:
  u / up / w / k      move up
  d / down / j        move down
  l / left / a        move left
  r / right           move right
  s / save            save the run
  scores              show the high scores
  h / help            show this text
  q / quit            leave the game";

/// One line per stat: health, score, steps, level and difficulty.
pub fn status_lines(engine: &GameEngine) -> Vec<String> {
    let player = engine.player();
    vec![
        format!("HP: {}/{}", player.hp(), player.max_hp()),
        format!("Score: {}", player.score()),
        format!("Steps: {}/{}", player.steps(), player.max_steps()),
        format!("Level: {}", engine.level_number()),
        format!("Difficulty: {}", engine.difficulty()),
    ]
}

/// Banner for a finished run, or `None` while it is still going.
pub fn game_over_message(engine: &GameEngine) -> Option<&'static str> {
    if !engine.is_game_over() {
        return None;
    }

    Some(match engine.death_type() {
        DeathType::NoHp => "Game over. You died.",
        DeathType::MaxSteps => "Game over. You walked your last step.",
        DeathType::None => "You win!",
    })
}
