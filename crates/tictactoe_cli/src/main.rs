//! Tic-tac-toe - unified CLI
//!
//! Interactive play, batch simulation and single-position analysis.

#![warn(missing_docs)]

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use tictactoe_cli::{Cli, Command, Console, GameArgs, PlayConfig, Renderer, Session, simulate};
use tictactoe_engine::{Board, Player, best_move, search};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_play(GameArgs::default()),
        Some(Command::Play(args)) => run_play(args),
        Some(Command::Simulate {
            x,
            o,
            games,
            seed,
            json,
        }) => run_simulate(x, o, games, seed, json),
        Some(Command::BestMove {
            board,
            side,
            seed,
            json,
        }) => run_best_move(board, side, seed, json),
    }
}

/// Run the interactive game.
#[instrument(skip(args))]
fn run_play(args: GameArgs) -> Result<()> {
    let config = PlayConfig::resolve(&args).context("Failed to load configuration")?;
    info!(?config, "Starting interactive play");

    let console = Console::new(io::stdin().lock(), io::stdout(), Renderer::new(*config.color()))
        .clearing();
    let mut session = Session::new(console, config);

    match args.opponent {
        Some(opponent) => session.run_fixed(opponent),
        None => session.run_menu(),
    }
}

/// Run computer-vs-computer games and print the tally.
fn run_simulate(
    x: tictactoe_engine::OpponentKind,
    o: tictactoe_engine::OpponentKind,
    games: u32,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let tally = simulate(x, o, games, seed)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        println!("{} (X: {}, O: {})", tally, x, o);
    }
    Ok(())
}

/// Print the optimal move for one position.
fn run_best_move(mut board: Board, side: Option<Player>, seed: Option<u64>, json: bool) -> Result<()> {
    if let Some(outcome) = board.outcome() {
        bail!("Position is already finished: {}", outcome);
    }
    let side = side.unwrap_or_else(|| board.next_player());

    let evaluation = if board.empty_count() == 9 {
        None
    } else {
        Some(search(&mut board, side))
    };
    let position = match evaluation {
        Some(evaluation) => evaluation.position(),
        None => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            best_move(&mut board, side, &mut rng)
        }
    }
    .context("No legal move available")?;

    if json {
        let value = serde_json::json!({
            "side": side,
            "position": position,
            "index": position.to_index(),
            "score": evaluation.map(|e| e.score()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match evaluation {
            Some(evaluation) => println!(
                "{} plays {} ({}), score {}",
                side,
                position.to_index(),
                position,
                evaluation.score()
            ),
            None => println!("{} opens at {} ({})", side, position.to_index(), position),
        }
    }
    Ok(())
}
