//! Transposition Table for caching search results
//!
//! The transposition table stores search results keyed by position hash,
//! remaining depth and side to move, so repeated positions reached through
//! different move orders are searched once. It lives as long as the engine
//! and survives across AI turns; it is only ever cleared as a whole.
//!
//! # Example
//!
//! ```
//! use connect3d::eval::Evaluation;
//! use connect3d::search::{TTKey, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1_000);
//! let key = TTKey { hash: 0x1234_5678_9ABC_DEF0, depth: 2, maximizing: true };
//!
//! tt.store(key, Evaluation::new(500, 3));
//! assert_eq!(tt.probe(key), Some(Evaluation::new(500, 3)));
//! ```

use std::collections::HashMap;

use crate::eval::Evaluation;

/// Cache key: position plus remaining depth and side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TTKey {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Remaining search depth
    pub depth: u8,
    /// True when the AI is to move
    pub maximizing: bool,
}

/// Transposition table for caching search results.
///
/// Entries are exact lookups. When the table grows past its capacity it is
/// cleared entirely rather than evicting selectively.
pub struct TranspositionTable {
    entries: HashMap<TTKey, Evaluation>,
    max_entries: usize,
    /// Number of full clears caused by overflow
    overflows: u64,
}

impl TranspositionTable {
    /// Create a new table that holds at most `max_entries` results.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            overflows: 0,
        }
    }

    /// Look up a cached result
    #[inline]
    #[must_use]
    pub fn probe(&self, key: TTKey) -> Option<Evaluation> {
        self.entries.get(&key).copied()
    }

    /// Store a result, clearing the whole table if it overflows.
    pub fn store(&mut self, key: TTKey, eval: Evaluation) {
        self.entries.insert(key, eval);
        if self.entries.len() > self.max_entries {
            log::debug!(
                "transposition table exceeded {} entries, clearing",
                self.max_entries
            );
            self.entries.clear();
            self.overflows += 1;
        }
    }

    /// Clear the table if it already holds more than its capacity.
    pub fn trim(&mut self) {
        if self.entries.len() > self.max_entries {
            self.entries.clear();
            self.overflows += 1;
        }
    }

    /// Clear all entries in the table.
    ///
    /// Called when starting a new game.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        TTStats {
            size: self.max_entries,
            used: self.entries.len(),
            usage_percent: if self.max_entries == 0 {
                0
            } else {
                (self.entries.len() as f64 / self.max_entries as f64 * 100.0).min(100.0) as u8
            },
            overflows: self.overflows,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Capacity in entries
    pub size: usize,
    /// Entries currently stored
    pub used: usize,
    /// Percentage of capacity in use (0-100)
    pub usage_percent: u8,
    /// Full clears caused by overflow
    pub overflows: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(hash: u64, depth: u8, maximizing: bool) -> TTKey {
        TTKey {
            hash,
            depth,
            maximizing,
        }
    }

    #[test]
    fn test_tt_store_probe() {
        let mut tt = TranspositionTable::new(16);
        tt.store(key(42, 3, true), Evaluation::new(100, 2));
        assert_eq!(tt.probe(key(42, 3, true)), Some(Evaluation::new(100, 2)));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_tt_key_includes_depth_and_side() {
        let mut tt = TranspositionTable::new(16);
        tt.store(key(42, 3, true), Evaluation::new(100, 2));
        assert_eq!(tt.probe(key(42, 2, true)), None);
        assert_eq!(tt.probe(key(42, 3, false)), None);
        assert_eq!(tt.probe(key(43, 3, true)), None);
    }

    #[test]
    fn test_tt_overwrite() {
        let mut tt = TranspositionTable::new(16);
        tt.store(key(1, 1, false), Evaluation::new(10, 1));
        tt.store(key(1, 1, false), Evaluation::new(-10, 3));
        assert_eq!(tt.probe(key(1, 1, false)), Some(Evaluation::new(-10, 3)));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_tt_overflow_clears_everything() {
        let mut tt = TranspositionTable::new(3);
        for h in 0..3 {
            tt.store(key(h, 1, true), Evaluation::new(0, 0));
        }
        assert_eq!(tt.len(), 3);

        // Fourth entry exceeds capacity: whole table goes
        tt.store(key(99, 1, true), Evaluation::new(0, 0));
        assert!(tt.is_empty());
        assert_eq!(tt.probe(key(0, 1, true)), None);
        assert_eq!(tt.stats().overflows, 1);
    }

    #[test]
    fn test_tt_clear_and_stats() {
        let mut tt = TranspositionTable::new(10);
        for h in 0..5 {
            tt.store(key(h, 2, false), Evaluation::new(1, 1));
        }
        let stats = tt.stats();
        assert_eq!(stats.size, 10);
        assert_eq!(stats.used, 5);
        assert_eq!(stats.usage_percent, 50);

        tt.clear();
        assert_eq!(tt.stats().used, 0);
    }
}
