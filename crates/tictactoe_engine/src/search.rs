//! Exhaustive minimax search.
//!
//! The search walks the whole remaining game tree on a single board,
//! applying and undoing moves in place. Finished positions score
//! `empty_count + 1` for the engine, negated for the opponent, and `0`
//! for a draw. A quicker win therefore outranks a slower one, and a
//! slower loss is preferred to a quicker one.

use crate::outcome::Outcome;
use crate::position::Position;
use crate::types::{Board, Player};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Result of evaluating a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Chosen move, or `None` for a finished position.
    position: Option<Position>,
    /// Game value from the engine's point of view.
    score: i32,
}

impl Evaluation {
    fn terminal(score: i32) -> Self {
        Self {
            position: None,
            score,
        }
    }

    /// Best move found, if the position was not already finished.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Minimax value of the position for the engine.
    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Minimax searcher for one engine side.
#[derive(Debug, Clone)]
pub struct Minimax {
    engine: Player,
    nodes: u64,
}

impl Minimax {
    /// Creates a searcher that maximizes for `engine`.
    pub fn new(engine: Player) -> Self {
        Self { engine, nodes: 0 }
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Evaluates `board` with `to_move` about to play.
    ///
    /// On return `board` is exactly as it was passed in, recorded winner
    /// included. A board that is already won or full is scored without
    /// playing anything. Among equally scored moves the lowest index wins.
    pub fn evaluate(&mut self, board: &mut Board, to_move: Player) -> Evaluation {
        self.nodes += 1;

        match board.outcome() {
            Some(Outcome::Winner(winner)) => {
                let magnitude = board.empty_count() as i32 + 1;
                return Evaluation::terminal(if winner == self.engine {
                    magnitude
                } else {
                    -magnitude
                });
            }
            Some(Outcome::Draw) => return Evaluation::terminal(0),
            None => {}
        }

        let just_moved = to_move.opponent();

        let maximizing = to_move == self.engine;
        let mut best = Evaluation::terminal(if maximizing { i32::MIN } else { i32::MAX });

        for position in board.available_moves() {
            // available_moves only yields empty squares
            if board.apply_move(position, to_move).is_err() {
                continue;
            }
            let child = self.evaluate(board, just_moved);
            board.undo_move(position);

            let improves = if maximizing {
                child.score > best.score
            } else {
                child.score < best.score
            };
            if improves {
                best = Evaluation {
                    position: Some(position),
                    score: child.score,
                };
            }
        }

        best
    }
}

/// Runs a full deterministic search for `engine`, who is to move.
#[instrument(skip(board), fields(engine = %engine, empty = board.empty_count()))]
pub fn search(board: &mut Board, engine: Player) -> Evaluation {
    #[cfg(debug_assertions)]
    let before = board.clone();

    let mut minimax = Minimax::new(engine);
    let evaluation = minimax.evaluate(board, engine);

    #[cfg(debug_assertions)]
    debug_assert_eq!(*board, before, "search must leave the board untouched");

    debug!(
        position = ?evaluation.position(),
        score = evaluation.score(),
        nodes = minimax.nodes(),
        "Search complete"
    );
    evaluation
}

/// Picks the optimal move for `side`.
///
/// The opening move on an empty board is drawn uniformly from all nine
/// cells; every cell draws under perfect play. Any other position is
/// searched exhaustively, so the result is a pure function of the board
/// and side. Returns `None` when the game is already over.
#[instrument(skip(board, rng), fields(side = %side))]
pub fn best_move<R: Rng + ?Sized>(board: &mut Board, side: Player, rng: &mut R) -> Option<Position> {
    let moves = board.available_moves();
    if board.winner().is_some() || moves.is_empty() {
        warn!("Best move requested for a finished game");
        return None;
    }
    if moves.len() == Position::ALL.len() {
        let opening = moves.choose(rng).copied();
        debug!(position = ?opening, "Random opening");
        return opening;
    }
    search(board, side).position()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board(cells: &str) -> Board {
        cells.parse().unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut b = board("XX.OO....");
        let mut minimax = Minimax::new(Player::X);
        let eval = minimax.evaluate(&mut b, Player::X);
        assert_eq!(eval.position(), Some(Position::TopRight));
        assert_eq!(eval.score(), 5);
        assert_eq!(minimax.nodes(), 157);
    }

    #[test]
    fn test_blocks_diagonal_threat() {
        let mut b = board("XOOOXX...");
        let mut minimax = Minimax::new(Player::O);
        let eval = minimax.evaluate(&mut b, Player::O);
        assert_eq!(eval.position(), Some(Position::BottomRight));
        assert_eq!(eval.score(), 0);
        assert_eq!(minimax.nodes(), 14);
    }

    #[test]
    fn test_prefers_faster_win() {
        // X can win at 5 now or set up slower wins elsewhere.
        let mut b = board("OO.XX....");
        let eval = search(&mut b, Player::X);
        assert_eq!(eval.position(), Some(Position::MiddleRight));
        assert_eq!(eval.score(), 5);
    }

    #[test]
    fn test_search_restores_board() {
        let mut b = board("X...O....");
        let before = b.clone();
        let eval = search(&mut b, Player::X);
        assert_eq!(b, before);
        assert!(eval.position().is_some());
    }

    #[test]
    fn test_finished_positions_have_no_move() {
        let mut drawn = board("XOXOXXOXO");
        assert_eq!(search(&mut drawn, Player::X), Evaluation::terminal(0));

        let mut won = board("XXXOO....");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(best_move(&mut won, Player::O, &mut rng), None);
        assert_eq!(best_move(&mut drawn, Player::X, &mut rng), None);
    }

    #[test]
    fn test_won_board_is_scored_not_played() {
        let mut b = board("XXXOO....");
        let before = b.clone();

        let mut minimax = Minimax::new(Player::X);
        let eval = minimax.evaluate(&mut b, Player::X);
        assert_eq!(eval, Evaluation::terminal(5));
        assert_eq!(minimax.nodes(), 1);
        assert_eq!(b, before);

        assert_eq!(search(&mut b, Player::X), Evaluation::terminal(5));
        assert_eq!(search(&mut b, Player::O), Evaluation::terminal(-5));
        assert_eq!(b, before);
        assert_eq!(b.winner(), Some(Player::X));
    }

    #[test]
    fn test_opening_is_any_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut b = Board::new();
        let opening = best_move(&mut b, Player::X, &mut rng).unwrap();
        assert!(opening.to_index() < 9);
        assert_eq!(b, Board::new());
    }
}
