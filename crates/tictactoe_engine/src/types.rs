//! Core domain types for tic-tac-toe.

use crate::action::MoveError;
use crate::outcome::Outcome;
use crate::position::Position;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{instrument, trace};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark drawn for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(BoardParseError::UnknownPlayer(other.to_string())),
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 tic-tac-toe board.
///
/// Besides the nine squares the board remembers which player completed a
/// line with the most recent move. Search drives a single board through
/// [`Board::apply_move`] / [`Board::undo_move`] pairs, so both the squares
/// and the recorded winner must be restored exactly by an undo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
    /// Player whose last move completed a line.
    current_winner: Option<Player>,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
            current_winner: None,
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Player whose most recent move completed a line, if any.
    pub fn winner(&self) -> Option<Player> {
        self.current_winner
    }

    /// Empty positions in ascending index order.
    pub fn available_moves(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of empty squares.
    pub fn empty_count(&self) -> usize {
        self.squares.iter().filter(|s| **s == Square::Empty).count()
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Finished result, or `None` while play continues.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.current_winner {
            Some(player) => Some(Outcome::Winner(player)),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Number of X and O marks, in that order.
    pub fn mark_counts(&self) -> (usize, usize) {
        self.squares
            .iter()
            .fold((0, 0), |(x, o), square| match square {
                Square::Occupied(Player::X) => (x + 1, o),
                Square::Occupied(Player::O) => (x, o + 1),
                Square::Empty => (x, o),
            })
    }

    /// Player due to move next, derived from the mark balance.
    pub fn next_player(&self) -> Player {
        let (x, o) = self.mark_counts();
        if x > o { Player::O } else { Player::X }
    }

    /// Places `player`'s mark at `pos`.
    ///
    /// Records `player` as the winner when the mark completes a line. An
    /// occupied square is rejected with the board left untouched.
    pub fn apply_move(&mut self, pos: Position, player: Player) -> Result<(), MoveError> {
        if !self.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        self.squares[pos.to_index()] = Square::Occupied(player);
        if self.check_win(pos, player) {
            trace!(position = %pos, player = %player, "Move completes a line");
            self.current_winner = Some(player);
        }
        Ok(())
    }

    /// Whether `player` owns a full line through `pos`.
    pub fn check_win(&self, pos: Position, player: Player) -> bool {
        rules::wins_through(self, pos, player)
    }

    /// Clears the square at `pos` and forgets any recorded winner.
    ///
    /// Only meaningful while exploring hypothetical moves.
    pub fn undo_move(&mut self, pos: Position) {
        self.squares[pos.to_index()] = Square::Empty;
        self.current_winner = None;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos)?,
                    Square::Occupied(player) => write!(f, "{}", player)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells of `X`, `O` or `.`/`_`/`-` for empty.
    ///
    /// Whitespace and `|` separators are ignored, so both `XX.OO....` and
    /// a pasted `X|X|.` grid work. The winner is recomputed with a full
    /// scan because there is no last move to check from.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = [Square::Empty; 9];
        let mut count = 0;
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let square = match c {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '_' | '-' => Square::Empty,
                other => return Err(BoardParseError::UnknownCell(other)),
            };
            if count == squares.len() {
                return Err(BoardParseError::WrongLength(count + 1));
            }
            squares[count] = square;
            count += 1;
        }
        if count != squares.len() {
            return Err(BoardParseError::WrongLength(count));
        }

        let mut board = Board {
            squares,
            current_winner: None,
        };
        board.current_winner = rules::check_winner(&board);
        Ok(board)
    }
}

/// Error raised when text cannot be read as a board or player.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// A character other than X, O or an empty marker.
    #[display("Unrecognized cell {:?} (expected X, O or .)", _0)]
    UnknownCell(char),

    /// Too few or too many cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),

    /// Not a player mark.
    #[display("Unrecognized player {:?} (expected X or O)", _0)]
    UnknownPlayer(String),
}

impl std::error::Error for BoardParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_count(), 9);
        assert_eq!(board.available_moves(), Position::ALL.to_vec());
        assert!(!board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.next_player(), Player::X);
    }

    #[test]
    fn test_apply_move_marks_square() {
        let mut board = Board::new();
        board.apply_move(Position::Center, Player::X).unwrap();
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(board.empty_count(), 8);
        assert!(!board.available_moves().contains(&Position::Center));
        assert_eq!(board.next_player(), Player::O);
    }

    #[test]
    fn test_apply_move_sets_winner() {
        let mut board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(board.winner(), None);
        board.apply_move(Position::TopRight, Player::X).unwrap();
        assert_eq!(board.winner(), Some(Player::X));
        assert_eq!(board.outcome(), Some(Outcome::Winner(Player::X)));
    }

    #[test]
    fn test_occupied_square_rejected_without_mutation() {
        let mut board: Board = "XXXOO....".parse().unwrap();
        let before = board.clone();
        let result = board.apply_move(Position::TopLeft, Player::O);
        assert_eq!(result, Err(MoveError::SquareOccupied(Position::TopLeft)));
        assert_eq!(board, before);
        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_undo_restores_board_and_winner() {
        let mut board: Board = "XX.OO....".parse().unwrap();
        let before = board.clone();
        board.apply_move(Position::TopRight, Player::X).unwrap();
        board.undo_move(Position::TopRight);
        assert_eq!(board, before);
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        let board: Board = "XOX XOO OXO".parse().unwrap();
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("XX".parse::<Board>(), Err(BoardParseError::WrongLength(2)));
        assert_eq!(
            "XXXXXXXXXX".parse::<Board>(),
            Err(BoardParseError::WrongLength(10))
        );
        assert_eq!(
            "XX.OO...Z".parse::<Board>(),
            Err(BoardParseError::UnknownCell('Z'))
        );
        assert!("Q".parse::<Player>().is_err());
        assert_eq!("o".parse::<Player>(), Ok(Player::O));
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board: Board = "X...O....".parse().unwrap();
        assert_eq!(board.to_string(), "X|1|2\n-+-+-\n3|O|5\n-+-+-\n6|7|8");
    }
}
