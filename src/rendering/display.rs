//! # Display Management
//!
//! Assembles the text screen: map, status panel and recent messages.

use crate::game::{GameEngine, Level, Position, PLAYER_SYMBOL};
use crate::rendering::{game_over_message, status_lines};

/// Draws a level, one row per line, with the player at `player`.
///
/// # Examples
///
/// ```
/// use mini_dungeon::{render_level, Level, Position};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let level = Level::new(1, 0, 4, StdRng::seed_from_u64(1));
/// assert_eq!(render_level(&level, Position::new(1, 2)), "####\n#..#\n#P.#\n####");
/// ```
pub fn render_level(level: &Level, player: Position) -> String {
    level
        .tiles
        .iter()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, tile)| {
                    if Position::new(x as i32, y as i32) == player {
                        PLAYER_SYMBOL
                    } else {
                        tile.symbol()
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draws the engine's current level with the player on it.
pub fn render_map(engine: &GameEngine) -> String {
    render_level(engine.current_level(), engine.player().position())
}

/// Text screen with a bounded message log.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    /// Message history, oldest first
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// How many of the latest messages a screen shows
    pub visible_messages: usize,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: 100,
            visible_messages: 3,
        }
    }

    /// Adds a message, dropping the oldest once the log is full.
    pub fn add_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }

    pub fn recent_messages(&self) -> &[String] {
        let start = self.messages.len().saturating_sub(self.visible_messages);
        &self.messages[start..]
    }

    /// Renders the full screen for one frame.
    pub fn render_game(&self, engine: &GameEngine) -> String {
        let mut screen = vec![render_map(engine), String::new()];
        screen.extend(status_lines(engine));

        if !self.messages.is_empty() {
            screen.push(String::new());
            screen.extend(self.recent_messages().iter().cloned());
        }

        if let Some(banner) = game_over_message(engine) {
            screen.push(String::new());
            screen.push(banner.to_string());
        }

        screen.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EngineConfig, Tile};
    use crate::scores::ScoreLedger;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_player_covers_the_tile_underneath() {
        let mut level = Level::new(1, 0, 5, StdRng::seed_from_u64(2));
        level.set_entry_position(Position::new(1, 3)).unwrap();
        level.set_tile(Position::new(3, 1), Tile::Gold).unwrap();

        let map = render_level(&level, Position::new(1, 3));
        assert_eq!(map, "#####\n#..G#\n#...#\n#P..#\n#####");

        let map = render_level(&level, Position::new(2, 2));
        assert_eq!(map.lines().nth(3), Some("#E..#"));
    }

    #[test]
    fn test_render_map_matches_grid() {
        let engine = GameEngine::with_config(
            5,
            EngineConfig::default(),
            Box::new(ScoreLedger::in_memory(5)),
            StdRng::seed_from_u64(17),
        )
        .unwrap();

        let map = render_map(&engine);
        let rows: Vec<&str> = map.lines().collect();
        assert_eq!(rows.len(), 10);
        assert_eq!(map.matches(PLAYER_SYMBOL).count(), 1);
        assert_eq!(rows[8].chars().nth(1), Some(PLAYER_SYMBOL));
        assert_eq!(map.matches('R').count(), 5);
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut display = TextDisplay::new();
        display.max_messages = 4;
        for i in 0..10 {
            display.add_message(format!("message {}", i));
        }
        display.add_message("");

        assert_eq!(display.messages.len(), 4);
        assert_eq!(display.messages[0], "message 6");
        assert_eq!(
            display.recent_messages(),
            &["message 7", "message 8", "message 9"]
        );
    }
}
