use std::path::PathBuf;

use crate::board::{Cell, Pos};

/// Reasons a placement is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("coordinates ({x}, {y}, {z}) are outside the 5x5x5 board")]
    OutOfBounds { x: i32, y: i32, z: i32 },

    #[error("cell {0} is already occupied")]
    Occupied(Pos),

    #[error("cell {0} has nothing below it (gravity rule)")]
    Floating(Pos),

    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Cell),

    #[error("the game is already over")]
    GameOver,

    #[error("no legal moves remain")]
    NoLegalMoves,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
