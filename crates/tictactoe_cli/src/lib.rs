//! Terminal front-end for the tic-tac-toe engine.
//!
//! Everything that touches the terminal lives here: the menu, colours,
//! prompting, configuration and batch runs. The engine crate stays free of
//! presentation concerns.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod render;
pub mod session;
pub mod simulate;
pub mod terminal;

pub use cli::{Cli, Command, GameArgs};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, PlayConfig};
pub use render::Renderer;
pub use session::{Flow, Session};
pub use simulate::{Tally, simulate};
pub use terminal::Console;
