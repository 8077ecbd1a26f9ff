//! Tic-tac-toe engine with an opponent that never loses.
//!
//! # Architecture
//!
//! - **Board**: nine squares plus the winner recorded by the last move,
//!   with in-place apply/undo for search
//! - **Rules**: line-through-last-move win check and full-board scans
//! - **Search**: exhaustive minimax with depth-weighted terminal scores
//! - **Move sources**: human (via a prompt), uniform random, optimal
//! - **Game**: turn loop alternating two move sources
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Board, Player, Position, search};
//!
//! let mut board: Board = "XX.OO....".parse()?;
//! let best = search(&mut board, Player::X);
//! assert_eq!(best.position(), Some(Position::TopRight));
//! # Ok::<(), tictactoe_engine::BoardParseError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod outcome;
mod player;
mod position;
mod search;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError};
pub use game::Game;
pub use outcome::{GameStatus, Outcome};
pub use player::{
    HumanPlayer, MoveSource, OpponentKind, OptimalPlayer, Prompt, RandomPlayer, validate_input,
};
pub use position::Position;
pub use search::{Evaluation, Minimax, best_move, search};
pub use types::{Board, BoardParseError, Player, Square};
