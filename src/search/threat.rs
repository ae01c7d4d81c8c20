//! Threat detection for one-move tactics
//!
//! A threat is a legal move that, once played, leaves the mover with at least
//! one three-in-a-row that still has an empty end. The engine plays its own
//! threats before searching and blocks the opponent's next, so these shallow
//! tactics never depend on the search reaching them in time.

use crate::board::{Board, Cell, Pos, DIRECTIONS};
use crate::config::TieBreak;
use crate::eval::{scan_run, PatternScore};
use crate::rules::valid_moves;

/// Minimum threat score kept by [`check_threats`] with default settings
pub const DEFAULT_MIN_THREAT_SCORE: i32 = 3_000;

/// A candidate move and the triple score it creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threat {
    pub pos: Pos,
    pub score: i32,
}

/// Score the triples `color` would own through `pos` after playing there.
///
/// Only the 26 directions through `pos` are scanned. Each direction scores
/// [`PatternScore::THREAT_OPEN_THREE`] for a run of exactly three with two
/// open ends or [`PatternScore::THREAT_THREE`] with one. The caller must have
/// already placed the piece.
fn threat_score(board: &Board, pos: Pos, color: Cell) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&dir| {
            let run = scan_run(board, pos, dir, color);
            match (run.len, run.open_ends) {
                (3, 2) => PatternScore::THREAT_OPEN_THREE,
                (3, 1) => PatternScore::THREAT_THREE,
                _ => 0,
            }
        })
        .sum()
}

/// Find every legal move that gives `color` a threat worth at least `min_score`.
///
/// Each candidate is placed, scored and removed again, so the board is
/// unchanged on return. Results come back in scan order; use [`sort_threats`]
/// to rank them.
pub fn check_threats(board: &mut Board, color: Cell, min_score: i32) -> Vec<Threat> {
    let mut threats = Vec::new();

    for pos in valid_moves(board) {
        board.place_stone(pos, color);
        let score = threat_score(board, pos, color);
        board.remove_stone(pos);

        if score >= min_score {
            threats.push(Threat { pos, score });
        }
    }

    threats
}

/// Rank threats best first: higher score, then layer per `tie_break`.
///
/// The sort is stable, so equal threats keep scan order.
pub fn sort_threats(threats: &mut [Threat], tie_break: TieBreak) {
    threats.sort_by(|a, b| {
        b.score.cmp(&a.score).then_with(|| match tie_break {
            TieBreak::LowestLayer => a.pos.z.cmp(&b.pos.z),
            TieBreak::HighestLayer => b.pos.z.cmp(&a.pos.z),
        })
    });
}

/// Best threat for `color`, if any.
pub fn best_threat(
    board: &mut Board,
    color: Cell,
    min_score: i32,
    tie_break: TieBreak,
) -> Option<Threat> {
    let mut threats = check_threats(board, color, min_score);
    sort_threats(&mut threats, tie_break);
    threats.first().copied()
}
