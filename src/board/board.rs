//! Board structure with occupancy tracking

use std::fmt;

use super::{Cell, Pos, BOARD_SIZE, TOTAL_CELLS};

/// Game board: 125 cells addressed by [`Pos::to_index`].
///
/// The board does not enforce the stacking rule itself; callers validate
/// placements with [`crate::rules::is_valid_move`] first. Search code relies
/// on `place_stone`/`remove_stone` being exact inverses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; TOTAL_CELLS],
    /// Number of occupied cells
    stones: u8,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; TOTAL_CELLS],
            stones: 0,
        }
    }

    /// Get occupant at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cells[pos.to_index()] == Cell::Empty
    }

    /// Place a piece (no legality check).
    ///
    /// Placing `Cell::Empty` clears the cell.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, cell: Cell) {
        let slot = &mut self.cells[pos.to_index()];
        match (*slot == Cell::Empty, cell == Cell::Empty) {
            (true, false) => self.stones += 1,
            (false, true) => self.stones -= 1,
            _ => {}
        }
        *slot = cell;
    }

    /// Remove a piece
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.place_stone(pos, Cell::Empty);
    }

    /// Total pieces on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones as usize
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() == TOTAL_CELLS
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    /// Iterate over occupied cells in scan order
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != Cell::Empty)
            .map(|(i, &c)| (Pos::from_index(i), c))
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Layer-by-layer printout, bottom layer first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for z in 0..BOARD_SIZE as u8 {
            writeln!(f, "z={}:", z + 1)?;
            for x in 0..BOARD_SIZE as u8 {
                let row: Vec<String> = (0..BOARD_SIZE as u8)
                    .map(|y| self.get(Pos::new(x, y, z)).symbol().to_string())
                    .collect();
                writeln!(f, "{}", row.join(" "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
