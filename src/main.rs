//! Connect3D terminal front end
//!
//! `connect3d play` runs a game against the AI on stdin/stdout;
//! `connect3d demo` runs a few fixed positions through the decision pipeline.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use connect3d::config::EngineConfig;
use connect3d::game::{GameOutcome, GameSession};
use connect3d::{AIEngine, Cell, Pos};

/// Play four-in-a-row on a 5x5x5 board with gravity.
#[derive(Parser)]
#[command(name = "connect3d", about = "3D four-in-a-row against a minimax AI")]
struct Cli {
    /// Path to TOML engine configuration
    #[arg(long, global = true, default_value = "Connect3D.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game in the terminal
    Play {
        /// Who moves first
        #[arg(long, value_enum, default_value_t = First::Player)]
        first: First,
    },
    /// Show the AI's choice on a few canonical positions
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum First {
    Player,
    Ai,
}

impl From<First> for Cell {
    fn from(first: First) -> Self {
        match first {
            First::Player => Cell::Player,
            First::Ai => Cell::Ai,
        }
    }
}

fn main() -> Result<()> {
    // Default to 'info' unless RUST_LOG says otherwise.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Command::Play { first } => play(config, first.into()),
        Command::Demo => {
            demo(&config);
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    EngineConfig::load_or_default(path)
        .with_context(|| format!("loading config from {}", path.display()))
}

fn play(config: EngineConfig, first: Cell) -> Result<()> {
    let mut game = GameSession::new(first, config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    info!("new game, {first:?} moves first");
    println!("You are R, the AI is B. Enter moves as `x y z` (1-5), `q` to quit.");

    while !game.is_over() {
        if game.turn() == Cell::Ai {
            let (pos, _) = game.play_ai()?;
            if let Some(result) = game.last_ai_result() {
                println!(
                    "AI plays {pos} ({:?}, {} ms)",
                    result.search_type, result.time_ms
                );
            }
            continue;
        }

        println!("{}", game.board());
        print!("Your move: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let Some((x, y, z)) = parse_coords(line) else {
            println!("Invalid input, expected three numbers like `3 3 1`");
            continue;
        };
        if let Err(err) = game.play_human_coords(x, y, z) {
            println!("Invalid move: {err}");
        }
    }

    println!("{}", game.board());
    match game.outcome() {
        Some(GameOutcome::Winner { cell, line }) => {
            let who = if cell == Cell::Ai { "AI wins" } else { "You win" };
            match line {
                Some(line) => {
                    let cells: Vec<String> = line.iter().map(Pos::to_string).collect();
                    println!("{who}: {}", cells.join(" "));
                }
                None => println!("{who}!"),
            }
        }
        Some(GameOutcome::Draw) => println!("Draw!"),
        None => {}
    }
    Ok(())
}

fn parse_coords(line: &str) -> Option<(i32, i32, i32)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<i32>);
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    let z = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y, z))
}

fn demo(config: &EngineConfig) {
    let scenarios: [(&str, &[((i32, i32, i32), Cell)]); 5] = [
        ("empty board", &[]),
        (
            "AI three on the bottom row",
            &[
                ((1, 1, 1), Cell::Ai),
                ((2, 1, 1), Cell::Ai),
                ((3, 1, 1), Cell::Ai),
            ],
        ),
        (
            "Player three on the bottom row",
            &[
                ((1, 1, 1), Cell::Player),
                ((1, 2, 1), Cell::Player),
                ((1, 3, 1), Cell::Player),
            ],
        ),
        (
            "AI open two",
            &[
                ((2, 2, 1), Cell::Ai),
                ((3, 2, 1), Cell::Ai),
                ((5, 5, 1), Cell::Player),
            ],
        ),
        (
            "quiet position",
            &[((3, 3, 1), Cell::Player), ((2, 4, 1), Cell::Ai)],
        ),
    ];

    for (name, stones) in scenarios {
        let mut engine = AIEngine::with_config(config.clone());
        for &((x, y, z), cell) in stones {
            if let Some(pos) = Pos::from_coords(x, y, z) {
                engine.make_move(pos, cell);
            }
        }

        let result = engine.ai_move_with_stats();
        let chosen = result
            .best_move
            .map_or_else(|| "none".to_string(), |p| p.to_string());
        println!(
            "{name:<32} -> {chosen:<10} {:<12} depth {} score {} ({} nodes, {} ms)",
            format!("{:?}", result.search_type),
            result.depth,
            result.score,
            result.nodes,
            result.time_ms
        );
    }
}
