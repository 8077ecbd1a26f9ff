//! Turn loop for a single game.

use crate::action::{Move, MoveError};
use crate::invariants;
use crate::outcome::{GameStatus, Outcome};
use crate::player::MoveSource;
use crate::position::Position;
use crate::types::{Board, Player};
use tracing::{debug, info, instrument};

/// Tic-tac-toe game engine.
///
/// Owns the board for one game, alternates sides starting with X, and
/// stops accepting moves once a line is completed or the board fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Plays `pos` for the side to move.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn make_move(&mut self, pos: Position) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        let player = self.to_move;
        self.board.apply_move(pos, player)?;
        self.history.push(Move::new(player, pos));
        self.status = self.board.outcome().into();
        if !self.status.is_over() {
            self.to_move = player.opponent();
        }

        debug_assert!(
            invariants::check_all(self).is_ok(),
            "invariants violated after {}",
            pos
        );

        debug!(position = %pos, status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// Plays `action`, checking that it is the mover's turn.
    pub fn play(&mut self, action: Move) -> Result<GameStatus, MoveError> {
        if action.player != self.to_move {
            return Err(MoveError::WrongPlayer(action.player));
        }
        self.make_move(action.position)
    }

    /// Asks `source` for the side to move's choice and plays it.
    pub fn play_turn(&mut self, source: &mut dyn MoveSource) -> Result<Move, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let player = self.to_move;
        let position = source.next_move(&mut self.board, player)?;
        self.make_move(position)?;
        Ok(Move::new(player, position))
    }

    /// Plays until the game ends, X moving first.
    #[instrument(skip_all, fields(x = x.name(), o = o.name()))]
    pub fn play_out(
        &mut self,
        x: &mut dyn MoveSource,
        o: &mut dyn MoveSource,
    ) -> Result<Outcome, MoveError> {
        loop {
            if let Some(outcome) = self.status.outcome() {
                info!(%outcome, moves = self.history.len(), "Game finished");
                return Ok(outcome);
            }
            match self.to_move {
                Player::X => self.play_turn(x)?,
                Player::O => self.play_turn(o)?,
            };
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
