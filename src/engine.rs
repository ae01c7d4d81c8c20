//! Main AI Engine integrating board state, rules and search
//!
//! The engine owns the board and the transposition table for one game and
//! picks the AI's move with a fixed priority pipeline. The first rule that
//! yields a move wins:
//!
//! 1. **Opening**: fixed bottom-layer move on an empty board
//! 2. **Immediate win**: a move that completes four for the AI
//! 3. **Block**: a cell where the Player would complete four
//! 4. **Threat**: the AI's best three-with-an-open-end
//! 5. **Threat block**: the Player's best such cell
//! 6. **Alpha-Beta**: iterative deepening minimax under the time budget
//! 7. **Fallback**: the configured fallback cell, else the first legal move
//!
//! # Example
//!
//! ```
//! use connect3d::{AIEngine, Cell, Pos};
//!
//! let mut engine = AIEngine::new();
//! for x in 1..=3 {
//!     engine.make_move(Pos::from_coords(x, 1, 1).unwrap(), Cell::Ai);
//! }
//!
//! let result = engine.ai_move_with_stats();
//! assert_eq!(result.best_move, Pos::from_coords(4, 1, 1));
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use crate::board::{Board, Cell, Pos};
use crate::config::EngineConfig;
use crate::error::MoveError;
use crate::eval::{evaluate_position, Evaluation, PatternScore};
use crate::rules::{self, WIN_LENGTH};
use crate::search::{best_threat, SearchResult, Searcher, TTStats, Threat};

/// Rule of the decision pipeline that produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Fixed opening on an empty board
    Opening,
    /// Completes four for the AI
    ImmediateWin,
    /// Occupies the cell where the Player would complete four
    Block,
    /// Creates an AI three with an open end
    Threat,
    /// Takes the cell where the Player would create such a three
    ThreatBlock,
    /// Iterative deepening minimax result
    AlphaBeta,
    /// Nothing else produced a move
    Fallback,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen move, `None` only when the board is full
    pub best_move: Option<Pos>,
    /// Score backing the choice, from the AI's point of view.
    /// A block of the Player's four reports 0: it only averts a loss.
    pub score: i32,
    pub search_type: SearchType,
    /// Deepest completed search iteration (0 when no search ran)
    pub depth: u8,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn tactical(pos: Pos, score: i32, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            depth: 0,
            time_ms: elapsed_ms(start),
            nodes: 0,
        }
    }

    #[inline]
    fn from_search(result: SearchResult, start: Instant) -> Self {
        Self {
            best_move: result.best_move,
            score: result.evaluation.score,
            search_type: SearchType::AlphaBeta,
            depth: result.depth,
            time_ms: elapsed_ms(start),
            nodes: result.nodes,
        }
    }

    #[inline]
    fn fallback(pos: Option<Pos>, nodes: u64, start: Instant) -> Self {
        Self {
            best_move: pos,
            score: 0,
            search_type: SearchType::Fallback,
            depth: 0,
            time_ms: elapsed_ms(start),
            nodes,
        }
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// AI engine for one game of Connect3D.
///
/// Holds the board, the searcher (Zobrist keys and transposition table) and
/// the tuning configuration. Only one search runs at a time; the caller
/// serialises turns and applies the returned move itself.
pub struct AIEngine {
    board: Board,
    searcher: Searcher,
    config: EngineConfig,
}

impl AIEngine {
    /// Create a new AI engine with default settings.
    ///
    /// Default configuration: 2 s search budget, depth 4 early and 6 late,
    /// 1,000,000 cached positions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    ///
    /// The configuration is used as given; run [`EngineConfig::validate`]
    /// first for untrusted input.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            searcher: Searcher::new(config.max_cache_entries, config.late_game_threshold),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces on the board
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.board.stone_count()
    }

    /// Whether public coordinates `(x, y, z)` name a legal placement.
    ///
    /// Never panics; anything out of range is simply not legal.
    #[must_use]
    pub fn valid_move(&self, x: i32, y: i32, z: i32) -> bool {
        rules::check_coords(&self.board, x, y, z).is_ok()
    }

    /// Explain why `pos` is not a legal placement.
    pub fn check_move(&self, pos: Pos) -> Result<(), MoveError> {
        rules::check_move(&self.board, pos)
    }

    /// Drop a piece at `pos`. The move must already have been validated.
    pub fn make_move(&mut self, pos: Pos, cell: Cell) {
        debug_assert!(rules::is_valid_move(&self.board, pos), "illegal move {pos}");
        self.board.place_stone(pos, cell);
    }

    /// Whether `cell` has four in a row, checked through `last_move` if given
    /// or across the whole board otherwise.
    #[must_use]
    pub fn check_win(&self, cell: Cell, last_move: Option<Pos>) -> bool {
        rules::check_win(&self.board, cell, last_move)
    }

    #[must_use]
    pub fn board_full(&self) -> bool {
        self.board.is_full()
    }

    /// Legal moves in scan order (ascending x, then y, then z)
    #[must_use]
    pub fn get_valid_moves(&self) -> Vec<Pos> {
        rules::valid_moves(&self.board)
    }

    /// Threat moves for `cell` in scan order, using the configured minimum score.
    pub fn check_threats(&mut self, cell: Cell) -> Vec<Threat> {
        crate::search::check_threats(&mut self.board, cell, self.config.threat_min_score)
    }

    /// Static evaluation of the current board from the AI's point of view.
    #[must_use]
    pub fn evaluate_position(&self) -> Evaluation {
        evaluate_position(
            &self.board,
            self.move_count(),
            self.config.late_game_threshold,
        )
    }

    /// Choose the AI's move without applying it.
    ///
    /// Returns `None` only if the board is full.
    #[must_use]
    pub fn ai_move(&mut self) -> Option<Pos> {
        self.ai_move_with_stats().best_move
    }

    /// Choose the AI's move and report which rule produced it.
    ///
    /// The board is left exactly as it was; every hypothetical placement made
    /// while deciding is reverted.
    #[must_use]
    pub fn ai_move_with_stats(&mut self) -> MoveResult {
        let start = Instant::now();
        self.searcher.trim_tt();

        let moves = rules::valid_moves(&self.board);
        if moves.is_empty() {
            log::warn!("ai_move requested on a full board");
            return MoveResult::fallback(None, 0, start);
        }
        let move_count = self.move_count();

        // 1. Opening
        if move_count == 0 {
            if let Some(opening) = self.config.opening().filter(|p| moves.contains(p)) {
                log::info!("AI opens at {opening}");
                return MoveResult::tactical(opening, 0, SearchType::Opening, start);
            }
        }

        // 2. Immediate win
        if let Some(pos) = self.find_immediate_win(&moves, Cell::Ai) {
            log::info!("AI wins with move {pos}");
            return MoveResult::tactical(pos, PatternScore::FOUR, SearchType::ImmediateWin, start);
        }

        // 3. Block the Player's immediate win
        if let Some(pos) = self.find_immediate_win(&moves, Cell::Player) {
            log::info!("AI blocks player's win at {pos}");
            return MoveResult::tactical(pos, 0, SearchType::Block, start);
        }

        // 4-5. Threats, own first
        let (min_score, tie_break) = (self.config.threat_min_score, self.config.threat_tie_break);
        if let Some(threat) = best_threat(&mut self.board, Cell::Ai, min_score, tie_break) {
            log::info!("AI creates threat at {} (score {})", threat.pos, threat.score);
            return MoveResult::tactical(threat.pos, threat.score, SearchType::Threat, start);
        }
        if let Some(threat) = best_threat(&mut self.board, Cell::Player, min_score, tie_break) {
            log::info!(
                "AI blocks player's threat at {} (score {})",
                threat.pos,
                threat.score
            );
            return MoveResult::tactical(
                threat.pos,
                -threat.score,
                SearchType::ThreatBlock,
                start,
            );
        }

        // 6. Iterative deepening
        let max_depth = self.config.max_depth(move_count);
        let result =
            self.searcher
                .search(&self.board, move_count, max_depth, self.config.time_limit());
        if let Some(pos) = result.best_move {
            log::info!(
                "AI chooses move {pos} with minimax (depth {}, score {}, {} nodes)",
                result.depth,
                result.evaluation.score,
                result.nodes
            );
            return MoveResult::from_search(result, start);
        }

        // 7. Fallback
        let pos = self
            .config
            .fallback()
            .filter(|p| moves.contains(p))
            .unwrap_or(moves[0]);
        log::info!("AI falls back to {pos}");
        MoveResult::fallback(Some(pos), result.nodes, start)
    }

    /// First move in `moves` that completes four for `cell`.
    fn find_immediate_win(&mut self, moves: &[Pos], cell: Cell) -> Option<Pos> {
        moves.iter().copied().find(|&pos| {
            self.board.place_stone(pos, cell);
            let wins = rules::check_win(&self.board, cell, Some(pos));
            self.board.remove_stone(pos);
            wins
        })
    }

    /// The first complete line of four on the board, for display.
    #[must_use]
    pub fn get_winning_combination(&self) -> Option<[Pos; WIN_LENGTH]> {
        rules::winning_combination(&self.board)
    }

    /// Start a new game: empty board and empty transposition table.
    pub fn reset(&mut self) {
        self.board.clear();
        self.searcher.clear_tt();
    }

    /// Clear the transposition table.
    ///
    /// Useful when changing game settings.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    /// Get transposition table statistics.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32, z: i32) -> Pos {
        Pos::from_coords(x, y, z).unwrap()
    }

    /// Shallow search so tests stay fast in debug builds
    fn fast_config() -> EngineConfig {
        EngineConfig {
            early_max_depth: 2,
            late_max_depth: 2,
            time_limit_ms: 60_000,
            ..EngineConfig::default()
        }
    }

    fn engine_with(stones: &[((i32, i32, i32), Cell)]) -> AIEngine {
        let mut engine = AIEngine::with_config(fast_config());
        for &((x, y, z), cell) in stones {
            engine.make_move(p(x, y, z), cell);
        }
        engine
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.config(), &EngineConfig::default());
        assert!(!engine.board_full());
        assert_eq!(engine.get_valid_moves().len(), 25);
    }

    #[test]
    fn test_valid_move_bounds_and_gravity() {
        let mut engine = AIEngine::new();
        assert!(engine.valid_move(1, 1, 1));
        assert!(!engine.valid_move(1, 1, 2));
        assert!(!engine.valid_move(0, 1, 1));
        assert!(!engine.valid_move(6, 1, 1));
        assert!(!engine.valid_move(1, 1, -3));
        assert!(!engine.valid_move(i32::MIN, 1, 1));
        assert!(!engine.valid_move(i32::MAX, 1, 1));
        assert!(!engine.valid_move(1, i32::MIN, i32::MAX));

        engine.make_move(p(1, 1, 1), Cell::Player);
        assert!(!engine.valid_move(1, 1, 1));
        assert!(engine.valid_move(1, 1, 2));
        assert_eq!(
            engine.check_move(p(1, 1, 1)),
            Err(MoveError::Occupied(p(1, 1, 1)))
        );
        assert_eq!(
            engine.check_move(p(2, 2, 2)),
            Err(MoveError::Floating(p(2, 2, 2)))
        );
    }

    #[test]
    fn test_engine_empty_board_opening() {
        let mut engine = AIEngine::new();
        let result = engine.ai_move_with_stats();
        assert_eq!(result.best_move, Some(p(3, 3, 1)));
        assert_eq!(result.search_type, SearchType::Opening);
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut engine = engine_with(&[
            ((1, 1, 1), Cell::Ai),
            ((2, 1, 1), Cell::Ai),
            ((3, 1, 1), Cell::Ai),
        ]);
        let result = engine.ai_move_with_stats();
        assert_eq!(result.best_move, Some(p(4, 1, 1)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_win_beats_block() {
        let mut engine = engine_with(&[
            ((1, 1, 1), Cell::Player),
            ((1, 2, 1), Cell::Player),
            ((1, 3, 1), Cell::Player),
            ((3, 5, 1), Cell::Ai),
            ((4, 5, 1), Cell::Ai),
            ((5, 5, 1), Cell::Ai),
        ]);
        let result = engine.ai_move_with_stats();
        assert_eq!(result.best_move, Some(p(2, 5, 1)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_blocks_player_win() {
        let mut engine = engine_with(&[
            ((1, 1, 1), Cell::Player),
            ((1, 2, 1), Cell::Player),
            ((1, 3, 1), Cell::Player),
        ]);
        let result = engine.ai_move_with_stats();
        assert_eq!(result.best_move, Some(p(1, 4, 1)));
        assert_eq!(result.search_type, SearchType::Block);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_engine_creates_threat() {
        let mut engine = engine_with(&[
            ((2, 2, 1), Cell::Ai),
            ((3, 2, 1), Cell::Ai),
            ((5, 5, 1), Cell::Player),
        ]);
        let result = engine.ai_move_with_stats();
        assert_eq!(result.best_move, Some(p(4, 2, 1)));
        assert_eq!(result.search_type, SearchType::Threat);
        assert_eq!(result.score, 20_000);
    }

    #[test]
    fn test_engine_blocks_threat() {
        let mut engine = engine_with(&[
            ((2, 2, 1), Cell::Player),
            ((3, 2, 1), Cell::Player),
            ((5, 5, 1), Cell::Ai),
        ]);
        let result = engine.ai_move_with_stats();
        assert_eq!(result.best_move, Some(p(4, 2, 1)));
        assert_eq!(result.search_type, SearchType::ThreatBlock);
    }

    #[test]
    fn test_engine_search_quiet_position() {
        let mut engine = engine_with(&[((3, 3, 1), Cell::Player), ((2, 4, 1), Cell::Ai)]);
        let before = engine.board().clone();

        let result = engine.ai_move_with_stats();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert_eq!(result.depth, 2);
        assert!(result.nodes > 0);
        assert!(rules::is_valid_move(engine.board(), result.best_move.unwrap()));
        assert_eq!(engine.board(), &before);
        assert!(engine.tt_stats().used > 0);
    }

    #[test]
    fn test_engine_deterministic() {
        let stones = [
            ((3, 3, 1), Cell::Player),
            ((2, 2, 1), Cell::Ai),
            ((5, 4, 1), Cell::Player),
            ((3, 3, 2), Cell::Ai),
        ];
        let mut a = engine_with(&stones);
        let mut b = engine_with(&stones);

        let first = a.ai_move_with_stats();
        assert_eq!(first.search_type, SearchType::AlphaBeta);
        let first = first.best_move;
        assert!(first.is_some());
        assert_eq!(first, b.ai_move());
        // Warm cache gives the same answer
        assert_eq!(first, a.ai_move());
    }

    #[test]
    fn test_engine_fallback_to_configured_cell() {
        let mut engine = AIEngine::with_config(EngineConfig {
            time_limit_ms: 0,
            ..EngineConfig::default()
        });
        engine.make_move(p(3, 3, 1), Cell::Player);
        engine.make_move(p(3, 3, 2), Cell::Ai);

        let result = engine.ai_move_with_stats();
        assert_eq!(result.best_move, Some(p(3, 3, 3)));
        assert_eq!(result.search_type, SearchType::Fallback);
    }

    #[test]
    fn test_engine_fallback_to_first_move() {
        let mut engine = AIEngine::with_config(EngineConfig {
            time_limit_ms: 0,
            ..EngineConfig::default()
        });
        engine.make_move(p(1, 1, 1), Cell::Player);

        let result = engine.ai_move_with_stats();
        assert_eq!(result.best_move, Some(p(1, 1, 2)));
        assert_eq!(result.search_type, SearchType::Fallback);
    }

    #[test]
    fn test_engine_full_board_has_no_move() {
        let mut engine = AIEngine::new();
        for pos in Pos::all() {
            engine.make_move(pos, Cell::Player);
        }
        assert!(engine.board_full());
        assert_eq!(engine.ai_move(), None);
    }

    #[test]
    fn test_engine_check_threats_and_eval() {
        let mut engine = engine_with(&[((2, 2, 1), Cell::Ai), ((3, 2, 1), Cell::Ai)]);
        let threats = engine.check_threats(Cell::Ai);
        assert_eq!(threats.len(), 2);
        assert!(engine.check_threats(Cell::Player).is_empty());
        assert!(engine.evaluate_position().score > 0);
        assert_eq!(engine.evaluate_position().moves_to_win, 2);
    }

    #[test]
    fn test_engine_winning_combination() {
        let mut engine = AIEngine::new();
        assert_eq!(engine.get_winning_combination(), None);
        for i in 1..=4 {
            engine.make_move(p(i, i, 1), Cell::Player);
        }
        assert!(engine.check_win(Cell::Player, Some(p(4, 4, 1))));
        assert!(engine.check_win(Cell::Player, None));
        assert!(!engine.check_win(Cell::Ai, None));
        assert_eq!(
            engine.get_winning_combination(),
            Some([p(1, 1, 1), p(2, 2, 1), p(3, 3, 1), p(4, 4, 1)])
        );
    }

    #[test]
    fn test_engine_reset_and_clear_cache() {
        let mut engine = engine_with(&[((3, 3, 1), Cell::Player), ((2, 4, 1), Cell::Ai)]);
        let _ = engine.ai_move();
        assert!(engine.tt_stats().used > 0);

        engine.clear_cache();
        assert_eq!(engine.tt_stats().used, 0);

        let _ = engine.ai_move();
        engine.reset();
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.tt_stats().used, 0);
        assert_eq!(engine.ai_move(), Some(p(3, 3, 1)));
    }

    #[test]
    fn test_search_type_equality() {
        assert_eq!(SearchType::Block, SearchType::Block);
        assert_ne!(SearchType::Threat, SearchType::ThreatBlock);
    }
}
