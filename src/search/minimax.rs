//! Minimax search with alpha-beta pruning and iterative deepening
//!
//! The AI is the maximizing side and the Player the minimizing side; scores
//! come from [`evaluate_position`] and are always from the AI's point of view.
//!
//! Cancellation is cooperative: every node checks the wall clock on entry and
//! returns `None` once the budget is spent. An aborted depth is discarded by
//! the root and the previous depth's answer stands.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use connect3d::board::{Board, Cell, Pos};
//! use connect3d::search::Searcher;
//!
//! let mut searcher = Searcher::new(100_000, 31);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(2, 2, 0), Cell::Player);
//!
//! let result = searcher.search(&board, 1, 1, Duration::from_secs(10));
//! assert!(result.best_move.is_some());
//! assert_eq!(result.depth, 1);
//! ```

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use crate::board::{Board, Cell, Pos};
use crate::eval::{evaluate_position, Evaluation, PatternScore, UNKNOWN_MOVES_TO_WIN};
use crate::rules::{check_win, valid_moves};

use super::{TTKey, TTStats, TranspositionTable, ZobristTable};

/// Alpha-beta bound standing in for infinity
const INF: i32 = i32::MAX;

/// Result of a root search
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    /// Best move from the deepest completed iteration
    pub best_move: Option<Pos>,
    /// Score and moves-to-win of that move
    pub evaluation: Evaluation,
    /// Deepest fully completed iteration (0 if none completed)
    pub depth: u8,
    /// Nodes visited across all iterations
    pub nodes: u64,
    /// True when an iteration was cut short by the time limit
    pub aborted: bool,
}

/// Alpha-beta searcher owning the hash keys and the transposition table.
///
/// The table persists across searches until [`Searcher::clear_tt`] is called
/// or it overflows.
pub struct Searcher {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    nodes: u64,
    start_time: Instant,
    time_limit: Duration,
    late_game_threshold: usize,
}

impl Searcher {
    /// Create a searcher with a transposition table of `max_cache_entries`.
    #[must_use]
    pub fn new(max_cache_entries: usize, late_game_threshold: usize) -> Self {
        Self {
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::new(max_cache_entries),
            nodes: 0,
            start_time: Instant::now(),
            time_limit: Duration::MAX,
            late_game_threshold,
        }
    }

    /// Clear the transposition table
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Clear the transposition table only if it is over capacity
    pub fn trim_tt(&mut self) {
        self.tt.trim();
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Nodes visited by the most recent search
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Full Zobrist hash of `board`
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        self.zobrist.hash(board)
    }

    /// Start the clock for a search bounded by `time_limit`.
    pub fn start_clock(&mut self, time_limit: Duration) {
        self.start_time = Instant::now();
        self.time_limit = time_limit;
    }

    #[inline]
    fn out_of_time(&self) -> bool {
        self.start_time.elapsed() > self.time_limit
    }

    /// Static evaluation of `board` after a piece of `cell` is dropped at `pos`.
    fn one_ply_score(&self, board: &mut Board, pos: Pos, cell: Cell, move_count: usize) -> i32 {
        board.place_stone(pos, cell);
        let score = evaluate_position(board, move_count, self.late_game_threshold).score;
        board.remove_stone(pos);
        score
    }

    /// Legal moves ordered for the side to move.
    ///
    /// Each move is scored by a one-ply evaluation. The sort is stable, so
    /// equal scores keep scan order.
    fn ordered_moves(&self, board: &mut Board, maximizing: bool, move_count: usize) -> Vec<Pos> {
        let cell = if maximizing { Cell::Ai } else { Cell::Player };
        let mut scored: Vec<(i32, Pos)> = valid_moves(board)
            .into_iter()
            .map(|pos| (self.one_ply_score(board, pos, cell, move_count + 1), pos))
            .collect();

        if maximizing {
            scored.sort_by_key(|&(score, _)| Reverse(score));
        } else {
            scored.sort_by_key(|&(score, _)| score);
        }
        scored.into_iter().map(|(_, pos)| pos).collect()
    }

    /// Depth-limited alpha-beta search of `board`.
    ///
    /// `last_move` is the move that produced this position and is the only
    /// place a new four can appear. `hash` must be the Zobrist hash of `board`.
    /// Returns `None` if the time limit expired at or below this node; the
    /// board is restored either way.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        last_move: Option<Pos>,
        hash: u64,
        move_count: usize,
    ) -> Option<Evaluation> {
        if self.out_of_time() {
            return None;
        }
        self.nodes += 1;

        let key = TTKey {
            hash,
            depth,
            maximizing,
        };
        if let Some(cached) = self.tt.probe(key) {
            return Some(cached);
        }

        if let Some(last) = last_move {
            if check_win(board, Cell::Player, Some(last)) {
                return Some(Evaluation::new(-PatternScore::FOUR, -1));
            }
            if check_win(board, Cell::Ai, Some(last)) {
                return Some(Evaluation::new(PatternScore::FOUR, 0));
            }
        }
        if board.is_full() {
            return Some(Evaluation::new(0, 0));
        }
        if depth == 0 {
            return Some(evaluate_position(
                board,
                move_count,
                self.late_game_threshold,
            ));
        }

        let cell = if maximizing { Cell::Ai } else { Cell::Player };
        let mut best = if maximizing { -INF } else { INF };
        let mut best_moves_to_win = UNKNOWN_MOVES_TO_WIN;

        for pos in self.ordered_moves(board, maximizing, move_count) {
            board.place_stone(pos, cell);
            let child_hash = self.zobrist.update(hash, pos, cell);
            let child = self.minimax(
                board,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                Some(pos),
                child_hash,
                move_count + 1,
            );
            board.remove_stone(pos);

            let child = child?;
            let improves = if maximizing {
                child.score > best
            } else {
                child.score < best
            };
            if improves || (child.score == best && child.moves_to_win < best_moves_to_win) {
                best = child.score;
                best_moves_to_win = child.moves_to_win + 1;
            }

            if maximizing {
                alpha = alpha.max(child.score);
            } else {
                beta = beta.min(child.score);
            }
            if beta <= alpha {
                break;
            }
        }

        let result = Evaluation::new(best, best_moves_to_win);
        self.tt.store(key, result);
        Some(result)
    }

    /// Root moves for the AI, best one-ply score first, ties on lower layer.
    fn root_moves(&self, board: &mut Board, move_count: usize) -> Vec<Pos> {
        let mut scored: Vec<(i32, Pos)> = valid_moves(board)
            .into_iter()
            .map(|pos| (self.one_ply_score(board, pos, Cell::Ai, move_count + 1), pos))
            .collect();
        scored.sort_by_key(|&(score, pos)| (Reverse(score), pos.z));
        scored.into_iter().map(|(_, pos)| pos).collect()
    }

    /// Iterative deepening search for the AI's best move.
    ///
    /// Depths `1..=max_depth` are searched while time remains. Every root move
    /// is searched with a full window; the best is the highest score, ties
    /// going to the smaller moves-to-win and then to move order. An iteration
    /// that runs out of time is discarded.
    pub fn search(
        &mut self,
        board: &Board,
        move_count: usize,
        max_depth: u8,
        time_limit: Duration,
    ) -> SearchResult {
        self.start_clock(time_limit);
        self.nodes = 0;

        let mut work_board = board.clone();
        let root_hash = self.zobrist.hash(&work_board);
        let moves = self.root_moves(&mut work_board, move_count);

        let mut result = SearchResult {
            best_move: None,
            evaluation: Evaluation::new(-INF, UNKNOWN_MOVES_TO_WIN),
            depth: 0,
            nodes: 0,
            aborted: false,
        };

        for depth in 1..=max_depth {
            if self.out_of_time() {
                break;
            }
            match self.search_root(&mut work_board, &moves, root_hash, depth, move_count) {
                Some((best_move, evaluation)) => {
                    log::debug!(
                        "depth {} complete: {:?} score {} moves_to_win {} ({} nodes)",
                        depth,
                        best_move.map(|p| p.coords()),
                        evaluation.score,
                        evaluation.moves_to_win,
                        self.nodes
                    );
                    result.best_move = best_move;
                    result.evaluation = evaluation;
                    result.depth = depth;
                }
                None => {
                    log::debug!(
                        "depth {} aborted after {:?}",
                        depth,
                        self.start_time.elapsed()
                    );
                    result.aborted = true;
                    break;
                }
            }
        }

        result.nodes = self.nodes;
        result
    }

    /// One root iteration. `None` if any root move ran out of time.
    fn search_root(
        &mut self,
        board: &mut Board,
        moves: &[Pos],
        root_hash: u64,
        depth: u8,
        move_count: usize,
    ) -> Option<(Option<Pos>, Evaluation)> {
        let mut best_move = None;
        let mut best = Evaluation::new(-INF, UNKNOWN_MOVES_TO_WIN);

        for &pos in moves {
            board.place_stone(pos, Cell::Ai);
            let hash = self.zobrist.update(root_hash, pos, Cell::Ai);
            let child = self.minimax(
                board,
                depth,
                -INF,
                INF,
                false,
                Some(pos),
                hash,
                move_count + 1,
            );
            board.remove_stone(pos);

            let child = child?;
            if child.score > best.score
                || (child.score == best.score && child.moves_to_win < best.moves_to_win)
            {
                best = child;
                best_move = Some(pos);
            }
        }

        Some((best_move, best))
    }
}
