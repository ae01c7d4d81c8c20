//! Turn-serialised game session between a human Player and the AI
//!
//! [`GameSession`] wraps an [`AIEngine`] with the turn protocol: whose turn it
//! is, game-over detection after every move, the winning line, and the last
//! move of each side. Moves are validated before they touch the board, so a
//! rejected move leaves the session unchanged.

use crate::board::{Board, Cell, Pos};
use crate::config::EngineConfig;
use crate::engine::{AIEngine, MoveResult};
use crate::error::MoveError;
use crate::rules::WIN_LENGTH;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// `cell` completed four; `line` is the first complete line on the board
    Winner {
        cell: Cell,
        line: Option<[Pos; WIN_LENGTH]>,
    },
    /// Board filled with no four in a row
    Draw,
}

/// One game of Connect3D.
pub struct GameSession {
    engine: AIEngine,
    first: Cell,
    turn: Cell,
    outcome: Option<GameOutcome>,
    last_player_move: Option<Pos>,
    last_ai_move: Option<Pos>,
    last_ai_result: Option<MoveResult>,
}

impl GameSession {
    /// Continue a game from an engine that already holds a position.
    ///
    /// The position must not already contain four in a row.
    #[must_use]
    pub fn resume(engine: AIEngine, turn: Cell) -> Self {
        debug_assert!(turn != Cell::Empty);
        Self {
            engine,
            first: turn,
            turn,
            outcome: None,
            last_player_move: None,
            last_ai_move: None,
            last_ai_result: None,
        }
    }

    /// Start a game where `first` moves first.
    #[must_use]
    pub fn new(first: Cell, config: EngineConfig) -> Self {
        Self::resume(AIEngine::with_config(config), first)
    }

    #[must_use]
    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    /// Side to move; meaningless once the game is over
    #[must_use]
    pub fn turn(&self) -> Cell {
        self.turn
    }

    #[must_use]
    pub fn first(&self) -> Cell {
        self.first
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Most recent move made by `cell`
    #[must_use]
    pub fn last_move(&self, cell: Cell) -> Option<Pos> {
        match cell {
            Cell::Player => self.last_player_move,
            Cell::Ai => self.last_ai_move,
            Cell::Empty => None,
        }
    }

    /// Statistics of the AI's most recent decision
    #[must_use]
    pub fn last_ai_result(&self) -> Option<&MoveResult> {
        self.last_ai_result.as_ref()
    }

    /// Play the human Player's move.
    ///
    /// Returns the outcome if this move ended the game.
    pub fn play_human(&mut self, pos: Pos) -> Result<Option<GameOutcome>, MoveError> {
        self.apply(pos, Cell::Player)
    }

    /// Play the human Player's move from public 1-based coordinates.
    pub fn play_human_coords(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<Option<GameOutcome>, MoveError> {
        let pos = Pos::from_coords(x, y, z).ok_or(MoveError::OutOfBounds { x, y, z })?;
        self.play_human(pos)
    }

    /// Let the AI choose and play its move.
    pub fn play_ai(&mut self) -> Result<(Pos, Option<GameOutcome>), MoveError> {
        self.ensure_turn(Cell::Ai)?;

        let result = self.engine.ai_move_with_stats();
        let pos = result.best_move.ok_or(MoveError::NoLegalMoves)?;
        self.last_ai_result = Some(result);

        let outcome = self.apply(pos, Cell::Ai)?;
        Ok((pos, outcome))
    }

    /// Start a new game with an empty board and an empty transposition table.
    pub fn reset(&mut self, first: Cell) {
        debug_assert!(first != Cell::Empty);
        self.engine.reset();
        self.first = first;
        self.turn = first;
        self.outcome = None;
        self.last_player_move = None;
        self.last_ai_move = None;
        self.last_ai_result = None;
    }

    fn ensure_turn(&self, cell: Cell) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.turn != cell {
            return Err(MoveError::NotYourTurn(cell));
        }
        Ok(())
    }

    fn apply(&mut self, pos: Pos, cell: Cell) -> Result<Option<GameOutcome>, MoveError> {
        self.ensure_turn(cell)?;
        self.engine.check_move(pos)?;
        self.engine.make_move(pos, cell);

        match cell {
            Cell::Ai => self.last_ai_move = Some(pos),
            _ => self.last_player_move = Some(pos),
        }

        if self.engine.check_win(cell, Some(pos)) {
            let line = self.engine.get_winning_combination();
            log::info!("{cell:?} wins with {pos}");
            self.outcome = Some(GameOutcome::Winner { cell, line });
        } else if self.engine.board_full() {
            log::info!("board full, game drawn");
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.turn = cell.opponent();
        }

        Ok(self.outcome)
    }
}
