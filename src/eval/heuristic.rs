//! Heuristic evaluation function for board positions
//!
//! This module provides the static evaluation used at search leaves and for
//! move ordering. It evaluates positions based on:
//! - Line patterns (fours, threes, open twos) through every occupied cell
//! - Positional bonuses (inner core, exact center, boundary cells)
//!
//! Scores are from the AI's point of view: AI patterns add, Player patterns
//! subtract.

use crate::board::{Board, Cell, Pos, BOARD_SIZE, DIRECTIONS};

use super::patterns::{scan_run, three_weights, PatternScore};

/// Sentinel `moves_to_win` when no win is in sight
pub const UNKNOWN_MOVES_TO_WIN: i32 = 100;

/// A scored position.
///
/// `moves_to_win` is a rough ply estimate used only to break ties between
/// equal scores: 0 when the AI already has four, -1 when the Player does,
/// 1/-1 for triples, 2/-2 for open twos, [`UNKNOWN_MOVES_TO_WIN`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub score: i32,
    pub moves_to_win: i32,
}

impl Evaluation {
    #[inline]
    pub const fn new(score: i32, moves_to_win: i32) -> Self {
        Self {
            score,
            moves_to_win,
        }
    }
}

/// Evaluate the board from the AI's perspective.
///
/// Every occupied cell is scored in all 26 directions, so a run is counted
/// once per member cell and once per direction along its axis. Longer runs
/// therefore weigh superlinearly; search strength is tuned against that.
///
/// # Arguments
/// * `board` - The current board state
/// * `move_count` - Pieces on the board, selects the triple weights
/// * `late_game_threshold` - Move count after which late-game weights apply
#[must_use]
pub fn evaluate_position(board: &Board, move_count: usize, late_game_threshold: usize) -> Evaluation {
    let (open_three, three) = three_weights(move_count, late_game_threshold);

    let mut score = 0i32;
    let mut moves_to_win = UNKNOWN_MOVES_TO_WIN;

    for (pos, cell) in board.occupied() {
        let sign = cell.sign();
        let is_ai = cell == Cell::Ai;

        for &dir in &DIRECTIONS {
            let run = scan_run(board, pos, dir, cell);

            if run.len >= 4 {
                score += PatternScore::FOUR * sign;
                moves_to_win = if is_ai { 0 } else { -1 };
            } else if run.len == 3 && run.open_ends >= 1 {
                let weight = if run.open_ends >= 2 { open_three } else { three };
                score += weight * sign;
                moves_to_win = moves_to_win.min(if is_ai { 1 } else { -1 });
            } else if run.len == 2 && run.open_ends >= 2 {
                score += PatternScore::OPEN_TWO * sign;
                moves_to_win = moves_to_win.min(if is_ai { 2 } else { -2 });
            }
        }
    }

    Evaluation::new(score + positional_score(board), moves_to_win)
}

/// Core, center and boundary bonuses.
///
/// The core bonus counts occupied core cells regardless of owner; center and
/// boundary bonuses are signed by the occupant.
fn positional_score(board: &Board) -> i32 {
    let mid = (BOARD_SIZE / 2) as u8;
    let center = Pos::new(mid, mid, mid);

    let mut score = 0;
    for (pos, cell) in board.occupied() {
        if pos.is_core() {
            score += PatternScore::CORE;
        } else {
            score += PatternScore::EDGE * cell.sign();
        }
        if pos == center {
            score += PatternScore::CENTER * cell.sign();
        }
    }
    score
}
