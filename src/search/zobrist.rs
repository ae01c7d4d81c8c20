//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing
//! pieces, so the search never snapshots the whole board to build a cache key.
//!
//! # Example
//!
//! ```
//! use connect3d::board::{Board, Cell, Pos};
//! use connect3d::search::ZobristTable;
//!
//! let zt = ZobristTable::new();
//! let mut board = Board::new();
//!
//! let hash1 = zt.hash(&board);
//!
//! let pos = Pos::new(2, 2, 0);
//! board.place_stone(pos, Cell::Ai);
//! let hash2 = zt.hash(&board);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.update(hash1, pos, Cell::Ai), hash2);
//! ```

use crate::board::{Board, Cell, Pos, TOTAL_CELLS};

/// Zobrist hash table for position hashing.
///
/// Holds a precomputed random key per (cell, occupant). Side to move is not
/// part of the hash; the transposition key carries it separately.
pub struct ZobristTable {
    player: [u64; TOTAL_CELLS],
    ai: [u64; TOTAL_CELLS],
}

impl ZobristTable {
    /// Create a new Zobrist table with deterministic random values.
    ///
    /// Uses a linear congruential generator with a fixed seed so hashes are
    /// reproducible across runs.
    #[must_use]
    pub fn new() -> Self {
        // Knuth's MMIX LCG constants
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            // splitmix64 finaliser
            let mut z = seed;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        };

        let mut player = [0u64; TOTAL_CELLS];
        let mut ai = [0u64; TOTAL_CELLS];
        for i in 0..TOTAL_CELLS {
            player[i] = next_rand();
            ai[i] = next_rand();
        }

        Self { player, ai }
    }

    #[inline]
    fn key(&self, pos: Pos, cell: Cell) -> u64 {
        let idx = pos.to_index();
        match cell {
            Cell::Player => self.player[idx],
            Cell::Ai => self.ai[idx],
            Cell::Empty => 0,
        }
    }

    /// Compute the full hash for a board position.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        board
            .occupied()
            .fold(0u64, |h, (pos, cell)| h ^ self.key(pos, cell))
    }

    /// Incrementally update a hash after placing or removing `cell` at `pos`.
    ///
    /// XOR is its own inverse, so the same call undoes itself.
    #[inline]
    #[must_use]
    pub fn update(&self, hash: u64, pos: Pos, cell: Cell) -> u64 {
        hash ^ self.key(pos, cell)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
