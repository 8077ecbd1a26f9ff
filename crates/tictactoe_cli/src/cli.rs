//! Command-line interface for the tic-tac-toe front-end.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::{Board, OpponentKind, Player};

/// Tic-tac-toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Terminal tic-tac-toe with random and unbeatable opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively (menu unless --opponent is given)
    Play(GameArgs),

    /// Play computer opponents against each other and tally results
    Simulate {
        /// Source playing X (random or optimal)
        #[arg(long, default_value = "optimal")]
        x: OpponentKind,

        /// Source playing O (random or optimal)
        #[arg(long, default_value = "random")]
        o: OpponentKind,

        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Base seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the optimal move for a position
    BestMove {
        /// Nine cells in row-major order, e.g. "XX.OO...."
        #[arg(short, long)]
        board: Board,

        /// Side to move (inferred from the mark counts when omitted)
        #[arg(short, long)]
        side: Option<Player>,

        /// Seed for the random opening on an empty board
        #[arg(long)]
        seed: Option<u64>,

        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by interactive play.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the menu and play this opponent (human, random, optimal)
    #[arg(short, long)]
    pub opponent: Option<OpponentKind>,

    /// Side the human plays against a computer
    #[arg(long)]
    pub human_side: Option<Player>,

    /// Seed for computer opponents
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause after computer moves, in milliseconds
    #[arg(long)]
    pub think_delay_ms: Option<u64>,

    /// Disable colours
    #[arg(long)]
    pub no_color: bool,
}
