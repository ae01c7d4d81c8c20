//! Evaluation module
//!
//! Contains:
//! - Pattern weights and run scanning
//! - Heuristic position evaluation

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate_position, Evaluation, UNKNOWN_MOVES_TO_WIN};
pub use patterns::{scan_run, three_weights, PatternScore, Run};
