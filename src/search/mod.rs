//! Search module for the Connect3D AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Threat detection for one-move tactics
//! - Minimax search with alpha-beta pruning and iterative deepening

pub mod minimax;
pub mod threat;
pub mod tt;
pub mod zobrist;

pub use minimax::{SearchResult, Searcher};
pub use threat::{best_threat, check_threats, sort_threats, Threat, DEFAULT_MIN_THREAT_SCORE};
pub use tt::{TTKey, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
