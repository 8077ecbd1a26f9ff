//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Player, Square};

/// The eight winning lines as board indices.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

const DIAGONALS: [[usize; 3]; 2] = [[0, 4, 8], [2, 4, 6]];

/// Whether `player` holds a complete line through `pos`.
///
/// Only the row and column of `pos` are inspected, plus both diagonals
/// when `pos` has an even index. A line can only be completed by the
/// latest mark, so checking from the move that was just played agrees
/// with a full-board scan during play.
pub fn wins_through(board: &Board, pos: Position, player: Player) -> bool {
    let squares = board.squares();
    let owned = |index: usize| squares[index] == Square::Occupied(player);

    let row = pos.row() * 3;
    if (row..row + 3).all(|i| owned(i)) {
        return true;
    }

    let col = pos.column();
    if (0..3).map(|r| col + r * 3).all(|i| owned(i)) {
        return true;
    }

    pos.on_diagonal() && DIAGONALS.iter().any(|line| line.iter().all(|&i| owned(i)))
}

/// Checks every line on the board for a winner.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    let squares = board.squares();
    LINES.iter().find_map(|&[a, b, c]| match squares[a] {
        Square::Occupied(player) if squares[b] == squares[a] && squares[c] == squares[a] => {
            Some(player)
        }
        _ => None,
    })
}
