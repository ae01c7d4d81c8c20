//! Placement legality under the stacking (gravity) rule
//!
//! A piece may rest on the bottom layer or directly on top of another piece.
//! Columns are chosen freely; only floating pieces are forbidden.

use crate::board::{Board, Pos};
use crate::error::MoveError;

/// Explain why a placement at `pos` is illegal, if it is.
pub fn check_move(board: &Board, pos: Pos) -> Result<(), MoveError> {
    if !board.is_empty(pos) {
        return Err(MoveError::Occupied(pos));
    }
    match pos.below() {
        Some(below) if board.is_empty(below) => Err(MoveError::Floating(pos)),
        _ => Ok(()),
    }
}

/// Check if a placement at `pos` is legal
#[inline]
pub fn is_valid_move(board: &Board, pos: Pos) -> bool {
    check_move(board, pos).is_ok()
}

/// Check a placement given 1-based public coordinates.
///
/// Any integers are accepted; out-of-range input is reported, never panics.
pub fn check_coords(board: &Board, x: i32, y: i32, z: i32) -> Result<Pos, MoveError> {
    let pos = Pos::from_coords(x, y, z).ok_or(MoveError::OutOfBounds { x, y, z })?;
    check_move(board, pos)?;
    Ok(pos)
}

/// All legal placements in scan order (ascending x, then y, then z).
pub fn valid_moves(board: &Board) -> Vec<Pos> {
    Pos::all().filter(|&pos| is_valid_move(board, pos)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, BOARD_SIZE};

    #[test]
    fn test_empty_board_bottom_layer_only() {
        let board = Board::new();
        let moves = valid_moves(&board);
        assert_eq!(moves.len(), BOARD_SIZE * BOARD_SIZE);
        assert!(moves.iter().all(|p| p.z == 0));
        assert_eq!(moves[0], Pos::new(0, 0, 0));
        assert_eq!(moves[1], Pos::new(0, 1, 0));
    }

    #[test]
    fn test_stacking_rule() {
        let mut board = Board::new();
        let floating = Pos::new(2, 2, 1);
        assert_eq!(check_move(&board, floating), Err(MoveError::Floating(floating)));

        board.place_stone(Pos::new(2, 2, 0), Cell::Player);
        assert!(is_valid_move(&board, floating));
        assert_eq!(
            check_move(&board, Pos::new(2, 2, 0)),
            Err(MoveError::Occupied(Pos::new(2, 2, 0)))
        );
        // Two above is still floating
        assert!(!is_valid_move(&board, Pos::new(2, 2, 2)));
    }

    #[test]
    fn test_column_stays_single_move() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 0, 0), Cell::Ai);
        board.place_stone(Pos::new(0, 0, 1), Cell::Player);

        let column: Vec<Pos> = valid_moves(&board)
            .into_iter()
            .filter(|p| p.x == 0 && p.y == 0)
            .collect();
        assert_eq!(column, vec![Pos::new(0, 0, 2)]);
    }

    #[test]
    fn test_check_coords_bounds() {
        let board = Board::new();
        assert_eq!(check_coords(&board, 3, 3, 1), Ok(Pos::new(2, 2, 0)));
        assert_eq!(
            check_coords(&board, 0, 3, 1),
            Err(MoveError::OutOfBounds { x: 0, y: 3, z: 1 })
        );
        assert_eq!(
            check_coords(&board, 3, 3, 6),
            Err(MoveError::OutOfBounds { x: 3, y: 3, z: 6 })
        );
    }

    #[test]
    fn test_valid_move_matches_definition_on_mixed_board() {
        let mut board = Board::new();
        let stones = [
            (Pos::new(0, 0, 0), Cell::Ai),
            (Pos::new(0, 0, 1), Cell::Player),
            (Pos::new(1, 3, 0), Cell::Player),
            (Pos::new(4, 4, 0), Cell::Ai),
            (Pos::new(4, 4, 1), Cell::Ai),
            (Pos::new(4, 4, 2), Cell::Player),
        ];
        for (pos, cell) in stones {
            board.place_stone(pos, cell);
        }

        for x in -1..=6 {
            for y in -1..=6 {
                for z in -1..=6 {
                    let expected = match Pos::from_coords(x, y, z) {
                        None => false,
                        Some(pos) => {
                            board.is_empty(pos)
                                && (pos.z == 0
                                    || !board.is_empty(Pos::new(pos.x, pos.y, pos.z - 1)))
                        }
                    };
                    assert_eq!(check_coords(&board, x, y, z).is_ok(), expected);
                }
            }
        }
    }
}
