//! # Mini Dungeon Main Entry Point
//!
//! Sets up logging, builds the engine and runs the console game loop.

use clap::Parser;
use log::info;
use mini_dungeon::{
    config, DungeonResult, EngineConfig, GameEngine, InputHandler, PlayerInput, ScoreLedger,
    TextDisplay, HELP_TEXT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command line arguments for Mini Dungeon.
#[derive(Parser, Debug)]
#[command(name = "mini-dungeon")]
#[command(about = "A small turn-based dungeon crawler")]
#[command(version)]
struct Args {
    /// Starting difficulty (0-10); asked for interactively when omitted
    #[arg(short, long)]
    difficulty: Option<i32>,

    /// Random seed for level generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where runs are saved
    #[arg(long, default_value = config::DEFAULT_SAVE_PATH)]
    save_path: PathBuf,

    /// Where high scores are kept
    #[arg(long, default_value = config::DEFAULT_SCORE_PATH)]
    score_path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> DungeonResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting Mini Dungeon v{}", mini_dungeon::VERSION);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let engine_config = EngineConfig {
        save_path: args.save_path.clone(),
        score_path: args.score_path.clone(),
        ..EngineConfig::default()
    };

    let resume = engine_config.save_path.is_file()
        && prompt(&mut lines, "A saved game was found. Resume it? (y/n) ")?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"));

    let difficulty = match (resume, args.difficulty) {
        (true, _) => config::DEFAULT_DIFFICULTY as i32,
        (false, Some(difficulty)) => difficulty,
        (false, None) => ask_difficulty(&mut lines)?,
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let scores = ScoreLedger::load(engine_config.score_path.clone(), engine_config.max_scores);
    let mut engine = GameEngine::with_config(difficulty, engine_config, Box::new(scores), rng)?;

    let mut display = TextDisplay::new();
    if resume {
        if engine.load_game() {
            display.add_message("Welcome back! Your run has been restored.");
        } else {
            display.add_message("The save could not be loaded. Starting a new run.");
        }
    } else {
        display.add_message("Welcome to Mini Dungeon! Type 'help' for commands.");
    }

    run_game_loop(&mut engine, &mut display, &mut lines)?;

    info!("Game loop ended");
    Ok(())
}

/// Initializes `env_logger`; `RUST_LOG` wins over `--log-level` when set.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .parse_env("RUST_LOG")
        .format_target(false)
        .init();
}

fn run_game_loop<I>(
    engine: &mut GameEngine,
    display: &mut TextDisplay,
    lines: &mut I,
) -> DungeonResult<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let input_handler = InputHandler::new();

    loop {
        println!("\n{}", display.render_game(engine));

        if engine.is_game_over() {
            println!("\nHigh scores:");
            let scores = engine.high_scores();
            println!("{}", if scores.is_empty() { "(none)" } else { scores.as_str() });
            return Ok(());
        }

        let Some(line) = prompt(lines, "> ")? else {
            info!("Input closed, leaving the game");
            return Ok(());
        };

        let input = input_handler.parse_line(&line);
        match input {
            PlayerInput::Quit => {
                info!("Player quit the game");
                return Ok(());
            }
            PlayerInput::Help => println!("{}", HELP_TEXT),
            other => {
                if let Some(message) = input_handler.apply(&other, engine) {
                    display.add_message(message);
                }
            }
        }
    }
}

fn ask_difficulty<I>(lines: &mut I) -> DungeonResult<i32>
where
    I: Iterator<Item = io::Result<String>>,
{
    let question = format!(
        "Choose a difficulty from 0 to {} [{}]: ",
        config::MAX_DIFFICULTY,
        config::DEFAULT_DIFFICULTY
    );

    let Some(answer) = prompt(lines, &question)? else {
        return Ok(config::DEFAULT_DIFFICULTY as i32);
    };

    match answer.trim().parse::<i32>() {
        Ok(value) if (0..=config::MAX_DIFFICULTY as i32).contains(&value) => Ok(value),
        _ => {
            if !answer.trim().is_empty() {
                println!(
                    "Not a difficulty between 0 and {}; using {}.",
                    config::MAX_DIFFICULTY,
                    config::DEFAULT_DIFFICULTY
                );
            }
            Ok(config::DEFAULT_DIFFICULTY as i32)
        }
    }
}

/// Prints `text` and reads one line. `None` means input is closed.
fn prompt<I>(lines: &mut I, text: &str) -> DungeonResult<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", text);
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}
