//! Pattern scores and run scanning for evaluation
//!
//! These constants define the scoring weights for line patterns on the cube.
//! They were tuned empirically; changing them changes move choice.

use crate::board::{Board, Cell, Direction, Pos};

/// Cells scanned past the origin on each side of a run
pub const SCAN_REACH: i32 = 3;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    // Terminal
    /// Four in a row - game over
    pub const FOUR: i32 = 100_000;

    // Threes (evaluator weights depend on game phase)
    /// Open three (both ends empty), before the late-game threshold
    pub const OPEN_THREE_EARLY: i32 = 8_000;
    /// Open three once more than half the board is filled
    pub const OPEN_THREE_LATE: i32 = 10_000;
    /// Three with one empty end, before the late-game threshold
    pub const THREE_EARLY: i32 = 3_000;
    /// Three with one empty end, late game
    pub const THREE_LATE: i32 = 5_000;

    /// Open two: both ends empty
    pub const OPEN_TWO: i32 = 500;

    // Threat detector weights (no phase split)
    pub const THREAT_OPEN_THREE: i32 = 10_000;
    pub const THREAT_THREE: i32 = 5_000;

    // Positional bonuses
    /// Per occupied cell in the inner 3x3x3 core (unsigned)
    pub const CORE: i32 = 10;
    /// Occupied exact center (3, 3, 3), signed by occupant
    pub const CENTER: i32 = 50;
    /// Per occupied boundary cell, signed by occupant
    pub const EDGE: i32 = 5;
}

/// Triple weights `(open, half_open)` for the current game phase.
///
/// The late-game weights apply once `move_count` exceeds `late_game_threshold`.
#[inline]
pub fn three_weights(move_count: usize, late_game_threshold: usize) -> (i32, i32) {
    if move_count > late_game_threshold {
        (PatternScore::OPEN_THREE_LATE, PatternScore::THREE_LATE)
    } else {
        (PatternScore::OPEN_THREE_EARLY, PatternScore::THREE_EARLY)
    }
}

/// A contiguous run through one cell along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Pieces in the run, including the origin
    pub len: u8,
    /// Number of ends (0-2) followed by an empty cell
    pub open_ends: u8,
}

/// Measure the run of `color` through `pos` along `dir` and its opposite.
///
/// Each side is scanned at most [`SCAN_REACH`] cells. A side is open when the
/// first non-matching cell within reach is empty; the board edge, an opposing
/// piece, or running out of reach leaves it closed.
#[inline]
pub fn scan_run(board: &Board, pos: Pos, dir: Direction, color: Cell) -> Run {
    let mut len = 1u8;
    let mut open_ends = 0u8;
    for sign in [1, -1] {
        for step in 1..=SCAN_REACH {
            match pos.offset(dir, sign * step).map(|p| board.get(p)) {
                Some(c) if c == color => len += 1,
                Some(Cell::Empty) => {
                    open_ends += 1;
                    break;
                }
                _ => break,
            }
        }
    }
    Run { len, open_ends }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::FOUR > PatternScore::OPEN_THREE_LATE);
        assert!(PatternScore::OPEN_THREE_LATE > PatternScore::OPEN_THREE_EARLY);
        assert!(PatternScore::OPEN_THREE_EARLY > PatternScore::THREE_LATE);
        assert!(PatternScore::THREE_LATE > PatternScore::THREE_EARLY);
        assert!(PatternScore::THREE_EARLY > PatternScore::OPEN_TWO);
    }

    #[test]
    fn test_three_weights_phase_boundary() {
        assert_eq!(three_weights(31, 31), (8_000, 3_000));
        assert_eq!(three_weights(32, 31), (10_000, 5_000));
        assert_eq!(three_weights(0, 31), (8_000, 3_000));
    }

    #[test]
    fn test_scan_run_open_both_ends() {
        let mut board = Board::new();
        board.place_stone(Pos::new(1, 0, 0), Cell::Ai);
        board.place_stone(Pos::new(2, 0, 0), Cell::Ai);
        board.place_stone(Pos::new(3, 0, 0), Cell::Ai);

        let run = scan_run(&board, Pos::new(2, 0, 0), (1, 0, 0), Cell::Ai);
        assert_eq!(run, Run { len: 3, open_ends: 2 });
    }

    #[test]
    fn test_scan_run_edge_and_opponent_close_ends() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 0, 0), Cell::Ai);
        board.place_stone(Pos::new(1, 0, 0), Cell::Ai);
        board.place_stone(Pos::new(2, 0, 0), Cell::Player);

        let run = scan_run(&board, Pos::new(0, 0, 0), (1, 0, 0), Cell::Ai);
        assert_eq!(run, Run { len: 2, open_ends: 0 });
    }

    #[test]
    fn test_scan_run_reach_limit() {
        // A full row of five: from one end only three more are seen
        let mut board = Board::new();
        for x in 0..5 {
            board.place_stone(Pos::new(x, 1, 0), Cell::Player);
        }
        let run = scan_run(&board, Pos::new(0, 1, 0), (1, 0, 0), Cell::Player);
        assert_eq!(run, Run { len: 4, open_ends: 0 });

        let run = scan_run(&board, Pos::new(2, 1, 0), (1, 0, 0), Cell::Player);
        assert_eq!(run, Run { len: 5, open_ends: 0 });
    }

    #[test]
    fn test_scan_run_direction_symmetry() {
        let mut board = Board::new();
        board.place_stone(Pos::new(1, 1, 0), Cell::Ai);
        board.place_stone(Pos::new(2, 2, 0), Cell::Ai);

        let forward = scan_run(&board, Pos::new(1, 1, 0), (1, 1, 0), Cell::Ai);
        let backward = scan_run(&board, Pos::new(1, 1, 0), (-1, -1, 0), Cell::Ai);
        assert_eq!(forward, backward);
        assert_eq!(forward, Run { len: 2, open_ends: 2 });
    }
}
