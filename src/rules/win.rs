//! Win condition checking for four-in-a-row on the 5x5x5 cube
//!
//! A side wins with four or more of its pieces contiguous along any of the
//! 13 axes (straight lines, face diagonals, space diagonals).

use crate::board::{Board, Cell, Direction, Pos, AXES, BOARD_SIZE, DIRECTIONS};

/// Pieces in a row needed to win
pub const WIN_LENGTH: usize = 4;

/// Offset from a scan cell to the first cell of the line along `axis`.
///
/// Negative components start 3 cells up, so every line walks with
/// increasing index along its first non-zero component.
fn line_start(axis: Direction) -> Direction {
    let up = |c: i8| if c < 0 { WIN_LENGTH as i8 - 1 } else { 0 };
    (up(axis.0), up(axis.1), up(axis.2))
}

/// Count same-colored pieces from `pos` (exclusive) along `dir`, at most 3.
#[inline]
fn count_dir(board: &Board, pos: Pos, dir: Direction, color: Cell) -> usize {
    (1..WIN_LENGTH as i32)
        .map_while(|step| pos.offset(dir, step))
        .take_while(|&p| board.get(p) == color)
        .count()
}

/// Fast four-in-a-row check through a specific position.
///
/// Only scans the lines through `pos`. Returns false when `pos` is not
/// occupied by `color`.
#[inline]
pub fn has_four_at_pos(board: &Board, pos: Pos, color: Cell) -> bool {
    if color == Cell::Empty || board.get(pos) != color {
        return false;
    }
    DIRECTIONS.chunks(2).any(|pair| {
        1 + count_dir(board, pos, pair[0], color) + count_dir(board, pos, pair[1], color)
            >= WIN_LENGTH
    })
}

/// Full-board check: any four-in-a-row for `color`.
///
/// Walks forward from every piece of `color` in all 26 directions. Used for
/// terminal verification, not on the search hot path.
pub fn has_four_in_row(board: &Board, color: Cell) -> bool {
    if color == Cell::Empty {
        return false;
    }
    board
        .occupied()
        .filter(|&(_, c)| c == color)
        .any(|(pos, _)| {
            DIRECTIONS
                .iter()
                .any(|&dir| 1 + count_dir(board, pos, dir, color) >= WIN_LENGTH)
        })
}

/// Check whether `color` has won.
///
/// With `last_move`, only lines through that cell are scanned; without it the
/// whole board is. Both forms agree on any board whose only winning lines pass
/// through `last_move`.
pub fn check_win(board: &Board, color: Cell, last_move: Option<Pos>) -> bool {
    match last_move {
        Some(pos) => has_four_at_pos(board, pos, color),
        None => has_four_in_row(board, color),
    }
}

/// Find the first complete line of four, for display.
///
/// Scans every start cell in scan order and every line family; the returned
/// cells are ordered along the line.
pub fn winning_combination(board: &Board) -> Option<[Pos; WIN_LENGTH]> {
    let n = BOARD_SIZE as u8;
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let base = Pos::new(x, y, z);
                for &axis in &AXES {
                    if let Some(line) = line_from(board, base, line_start(axis), axis) {
                        return Some(line);
                    }
                }
            }
        }
    }
    None
}

/// The four cells starting at `base + start` along `step`, if they are all on
/// the board and share one occupant.
fn line_from(
    board: &Board,
    base: Pos,
    start: Direction,
    step: Direction,
) -> Option<[Pos; WIN_LENGTH]> {
    let origin = base.offset(start, 1)?;
    let mut line = [origin; WIN_LENGTH];
    for (i, slot) in line.iter_mut().enumerate().skip(1) {
        *slot = origin.offset(step, i as i32)?;
    }

    let first = board.get(origin);
    if first == Cell::Empty || line.iter().any(|&p| board.get(p) != first) {
        return None;
    }
    Some(line)
}
