use std::path::Path;
use std::time::Duration;

use crate::board::{Pos, TOTAL_CELLS};
use crate::error::ConfigError;

/// Deepest search a config may ask for: one ply per cell of the board.
pub const MAX_SEARCH_DEPTH: u8 = TOTAL_CELLS as u8;

/// Which layer wins when two threats score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Prefer the smallest z
    #[default]
    LowestLayer,
    /// Prefer the largest z
    HighestLayer,
}

/// Engine tuning, loadable from TOML.
///
/// Coordinates are the public 1-based `[x, y, z]` triples.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget for the iterative deepening search
    pub time_limit_ms: u64,
    /// Maximum depth while `move_count < late_game_threshold`
    pub early_max_depth: u8,
    /// Maximum depth afterwards
    pub late_max_depth: u8,
    pub late_game_threshold: usize,
    /// Transposition table is cleared once it holds more than this
    pub max_cache_entries: usize,
    /// Played on an empty board; must be on the bottom layer
    pub opening_move: [u8; 3],
    /// Played when search produced nothing, if legal
    pub fallback_move: [u8; 3],
    pub threat_min_score: i32,
    pub threat_tie_break: TieBreak,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            time_limit_ms: 2_000,
            early_max_depth: 4,
            late_max_depth: 6,
            late_game_threshold: 31,
            max_cache_entries: 1_000_000,
            opening_move: [3, 3, 1],
            fallback_move: [3, 3, 3],
            threat_min_score: 3_000,
            threat_tie_break: TieBreak::LowestLayer,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&content)?;
        log::info!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit_ms == 0 {
            return Err(ConfigError::Validation("time_limit_ms must be > 0".into()));
        }
        if self.early_max_depth == 0 || self.late_max_depth == 0 {
            return Err(ConfigError::Validation(
                "early_max_depth and late_max_depth must be >= 1".into(),
            ));
        }
        if self.early_max_depth > MAX_SEARCH_DEPTH || self.late_max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "early_max_depth and late_max_depth must be <= {MAX_SEARCH_DEPTH}"
            )));
        }
        if self.max_cache_entries == 0 {
            return Err(ConfigError::Validation(
                "max_cache_entries must be > 0".into(),
            ));
        }
        let Some(opening) = coords_to_pos(self.opening_move) else {
            return Err(ConfigError::Validation(
                "opening_move coordinates must be in 1..=5".into(),
            ));
        };
        if opening.z != 0 {
            return Err(ConfigError::Validation(
                "opening_move must be on the bottom layer (z = 1)".into(),
            ));
        }
        if coords_to_pos(self.fallback_move).is_none() {
            return Err(ConfigError::Validation(
                "fallback_move coordinates must be in 1..=5".into(),
            ));
        }
        if self.threat_min_score <= 0 {
            return Err(ConfigError::Validation(
                "threat_min_score must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Search time budget
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    /// Maximum search depth for the given number of pieces on the board.
    pub fn max_depth(&self, move_count: usize) -> u8 {
        if move_count < self.late_game_threshold {
            self.early_max_depth
        } else {
            self.late_max_depth
        }
    }

    /// Opening move as a board position; `None` if the config was never validated.
    pub fn opening(&self) -> Option<Pos> {
        coords_to_pos(self.opening_move)
    }

    pub fn fallback(&self) -> Option<Pos> {
        coords_to_pos(self.fallback_move)
    }
}

fn coords_to_pos([x, y, z]: [u8; 3]) -> Option<Pos> {
    Pos::from_coords(x.into(), y.into(), z.into())
}
