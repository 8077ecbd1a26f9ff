//! Move sources: where each side's next move comes from.
//!
//! A game is played between two [`MoveSource`]s. Humans supply moves
//! through a [`Prompt`]; the computer either picks uniformly at random
//! or plays the minimax optimum.

use crate::action::MoveError;
use crate::position::Position;
use crate::search;
use crate::types::{Board, Player};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Anything that can choose a move for a side.
pub trait MoveSource {
    /// Chooses a move for `side` on `board`.
    ///
    /// Implementations may explore hypothetical moves on `board` but must
    /// hand it back unchanged.
    fn next_move(&mut self, board: &mut Board, side: Player) -> Result<Position, MoveError>;

    /// Returns the source's display name.
    fn name(&self) -> &str;

    /// Whether the source is a computer opponent.
    fn is_computer(&self) -> bool {
        true
    }
}

/// Text channel to a human player.
pub trait Prompt {
    /// Asks for a move. `None` means no more input will arrive.
    fn read_move(&mut self, board: &Board, side: Player) -> Option<String>;

    /// Reports why the last answer was refused.
    fn reject(&mut self, error: &MoveError);
}

/// Human player answering through a [`Prompt`].
#[derive(Debug)]
pub struct HumanPlayer<P> {
    name: String,
    prompt: P,
}

impl<P: Prompt> HumanPlayer<P> {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, prompt: P) -> Self {
        Self {
            name: name.into(),
            prompt,
        }
    }

    /// Returns the underlying prompt.
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Returns the underlying prompt mutably, e.g. to show menus between games.
    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    /// Consumes the player, returning its prompt.
    pub fn into_prompt(self) -> P {
        self.prompt
    }
}

/// Checks raw input against the board.
///
/// Accepts a cell index `0`-`8` or a cell label; the cell must be empty.
pub fn validate_input(board: &Board, input: &str) -> Result<Position, MoveError> {
    let position = Position::from_label_or_number(input)
        .ok_or_else(|| MoveError::Unrecognized(input.trim().to_string()))?;
    if board.is_empty(position) {
        Ok(position)
    } else {
        Err(MoveError::SquareOccupied(position))
    }
}

impl<P: Prompt> MoveSource for HumanPlayer<P> {
    #[instrument(skip(self, board), fields(human = %self.name))]
    fn next_move(&mut self, board: &mut Board, side: Player) -> Result<Position, MoveError> {
        if board.available_moves().is_empty() {
            return Err(MoveError::GameOver);
        }
        loop {
            let input = self
                .prompt
                .read_move(board, side)
                .ok_or(MoveError::InputClosed)?;
            match validate_input(board, &input) {
                Ok(position) => return Ok(position),
                Err(e) => {
                    debug!(error = %e, "Rejected human input");
                    self.prompt.reject(&e);
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        false
    }
}

/// Computer player choosing uniformly among legal moves.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    /// Creates a random player seeded from the operating system.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible random player.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoveSource for RandomPlayer {
    #[instrument(skip(self, board), fields(ai = %self.name))]
    fn next_move(&mut self, board: &mut Board, side: Player) -> Result<Position, MoveError> {
        if board.winner().is_some() {
            return Err(MoveError::GameOver);
        }
        let position = board
            .available_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(MoveError::GameOver)?;
        debug!(position = %position, "Random choice");
        Ok(position)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Computer player that never loses.
#[derive(Debug, Clone)]
pub struct OptimalPlayer {
    name: String,
    rng: StdRng,
}

impl OptimalPlayer {
    /// Creates an optimal player whose opening is seeded from the OS.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an optimal player with a reproducible opening.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoveSource for OptimalPlayer {
    #[instrument(skip(self, board), fields(ai = %self.name))]
    fn next_move(&mut self, board: &mut Board, side: Player) -> Result<Position, MoveError> {
        let position = search::best_move(board, side, &mut self.rng).ok_or(MoveError::GameOver)?;
        info!(position = %position, "Optimal move");
        Ok(position)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The kinds of opponent a side can be assigned.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OpponentKind {
    /// Moves typed by a person.
    Human,
    /// Uniformly random legal moves.
    Random,
    /// Minimax-optimal moves.
    Optimal,
}

impl OpponentKind {
    /// Menu description.
    pub fn description(self) -> &'static str {
        match self {
            OpponentKind::Human => "Player",
            OpponentKind::Random => "Computer (Easy)",
            OpponentKind::Optimal => "Computer (Impossible)",
        }
    }

    /// Builds a computer source of this kind.
    ///
    /// Returns `None` for [`OpponentKind::Human`], which needs a prompt.
    pub fn computer(self, seed: Option<u64>) -> Option<Box<dyn MoveSource>> {
        let source: Box<dyn MoveSource> = match (self, seed) {
            (OpponentKind::Human, _) => return None,
            (OpponentKind::Random, Some(seed)) => Box::new(RandomPlayer::seeded("Easy AI", seed)),
            (OpponentKind::Random, None) => Box::new(RandomPlayer::new("Easy AI")),
            (OpponentKind::Optimal, Some(seed)) => {
                Box::new(OptimalPlayer::seeded("Impossible AI", seed))
            }
            (OpponentKind::Optimal, None) => Box::new(OptimalPlayer::new("Impossible AI")),
        };
        Some(source)
    }
}
