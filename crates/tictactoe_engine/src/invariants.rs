//! First-class invariants for tic-tac-toe.
//!
//! Invariants are logical properties that must hold after every real move.
//! [`Game`] checks them in debug builds; tests check them directly.

use crate::game::Game;
use crate::rules;
use crate::types::{Board, Square};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invariant violated: {}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// X moves first and the sides alternate, so X has as many marks as O
/// or exactly one more.
pub struct MarkBalance;

impl Invariant<Board> for MarkBalance {
    fn holds(board: &Board) -> bool {
        let (x, o) = board.mark_counts();
        let valid = x == o || x == o + 1;
        if !valid {
            warn!(x, o, "Mark balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "X has the same number of marks as O or one more"
    }
}

/// The recorded winner agrees with a scan of every line.
pub struct WinnerMatchesBoard;

impl Invariant<Board> for WinnerMatchesBoard {
    fn holds(board: &Board) -> bool {
        let scanned = rules::check_winner(board);
        let valid = scanned == board.winner();
        if !valid {
            warn!(recorded = ?board.winner(), ?scanned, "Recorded winner disagrees with board");
        }
        valid
    }

    fn description() -> &'static str {
        "Recorded winner matches the board"
    }
}

/// Every occupied square was claimed by exactly one recorded move.
pub struct HistoryMatchesBoard;

impl Invariant<Game> for HistoryMatchesBoard {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        let filled = 9 - board.empty_count();
        let history = game.history();
        let consistent = history
            .iter()
            .all(|m| board.get(m.position) == Square::Occupied(m.player));
        let valid = consistent && filled == history.len();
        if !valid {
            warn!(filled, history_len = history.len(), "History disagrees with board");
        }
        valid
    }

    fn description() -> &'static str {
        "Move history accounts for every mark on the board"
    }
}

/// Checks every invariant, collecting all violations.
pub fn check_all(game: &Game) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = Vec::new();

    if !MarkBalance::holds(game.board()) {
        violations.push(InvariantViolation::new(MarkBalance::description()));
    }
    if !WinnerMatchesBoard::holds(game.board()) {
        violations.push(InvariantViolation::new(WinnerMatchesBoard::description()));
    }
    if !HistoryMatchesBoard::holds(game) {
        violations.push(InvariantViolation::new(HistoryMatchesBoard::description()));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
