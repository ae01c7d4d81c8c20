//! Connect3D: four-in-a-row on a 5x5x5 cube with gravity
//!
//! A game engine and minimax AI for 3D four-in-a-row:
//! - 5x5x5 board, z = 1 is the bottom layer
//! - A piece can only be placed on the bottom layer or on top of another piece
//! - Four in a row along any of the 13 axes of the cube wins
//! - A full board with no four in a row is a draw
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Cells, coordinates, directions and the board array
//! - [`rules`]: Move legality, win detection, winning-line extraction
//! - [`eval`]: Pattern weights and the static evaluator
//! - [`search`]: Zobrist hashing, transposition table, threats, minimax
//! - [`engine`]: Main AI engine running the decision pipeline
//! - [`game`]: Turn protocol between a human Player and the AI
//! - [`config`]: Tunable engine settings loaded from TOML
//!
//! # Quick Start
//!
//! ```
//! use connect3d::{AIEngine, Cell, Pos};
//!
//! let mut engine = AIEngine::new();
//!
//! // Empty board: the AI plays its fixed opening
//! let pos = engine.ai_move().unwrap();
//! assert_eq!(pos, Pos::from_coords(3, 3, 1).unwrap());
//!
//! engine.make_move(pos, Cell::Ai);
//! assert!(engine.valid_move(3, 3, 2));
//! ```
//!
//! # Decision Priority
//!
//! 1. Fixed opening on an empty board
//! 2. Immediate winning move
//! 3. Block the Player's immediate win
//! 4. Create a three with an open end, or block the Player's
//! 5. Iterative deepening alpha-beta under a time budget
//! 6. Fallback cell

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Pos, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{ConfigError, MoveError};
pub use game::{GameOutcome, GameSession};
