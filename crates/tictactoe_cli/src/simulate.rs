//! Batch play between computer opponents.

use anyhow::{Result, bail};
use serde::Serialize;
use tictactoe_engine::{Game, OpponentKind, Outcome, Player};
use tracing::{info, instrument};

/// Results of a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Tally {
    /// Counts one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Player::X) => self.x_wins += 1,
            Outcome::Winner(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Games counted so far.
    pub fn total(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, {} drawn",
            self.total(),
            self.x_wins,
            self.o_wins,
            self.draws
        )
    }
}

/// Plays `games` games between two computer kinds.
///
/// With a `seed`, game `i` seeds X with `seed + 2i` and O with
/// `seed + 2i + 1`, so runs are reproducible.
#[instrument]
pub fn simulate(x: OpponentKind, o: OpponentKind, games: u32, seed: Option<u64>) -> Result<Tally> {
    let mut tally = Tally::default();
    for i in 0..u64::from(games) {
        let seed_for = |offset: u64| seed.map(|s| s.wrapping_add(2 * i + offset));
        let (Some(mut x_source), Some(mut o_source)) = (x.computer(seed_for(0)), o.computer(seed_for(1)))
        else {
            bail!("Simulation needs computer players on both sides, got {} vs {}", x, o);
        };
        let outcome = Game::new().play_out(x_source.as_mut(), o_source.as_mut())?;
        tally.record(outcome);
    }
    info!(%tally, "Simulation finished");
    Ok(tally)
}
