//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). The board calls into
//! these for its own queries; the full-scan variants are kept separately
//! as the reference the incremental check is measured against.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, wins_through};
