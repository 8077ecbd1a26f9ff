//! Interactive menu and match loop.

use crate::config::PlayConfig;
use crate::terminal::Console;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::Duration;
use strum::IntoEnumIterator;
use tictactoe_engine::{Game, HumanPlayer, MoveError, MoveSource, OpponentKind, Outcome};
use tracing::{debug, info, instrument};

/// Numbered menu entries, one per opponent kind.
fn menu_entries() -> Vec<(char, String)> {
    OpponentKind::iter()
        .zip('1'..)
        .map(|(kind, key)| (key, format!("Player vs {}", kind.description())))
        .collect()
}

/// Whether the user wants another round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Leave the program.
    Quit,
}

/// One person at the keyboard, playing any number of matches.
pub struct Session<R, W> {
    human: HumanPlayer<Console<R, W>>,
    config: PlayConfig,
    matches: u64,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session on `console`.
    pub fn new(console: Console<R, W>, config: PlayConfig) -> Self {
        Self {
            human: HumanPlayer::new("You", console),
            config,
            matches: 0,
        }
    }

    fn console(&mut self) -> &mut Console<R, W> {
        self.human.prompt_mut()
    }

    /// Returns the console, e.g. to inspect captured output.
    pub fn into_console(self) -> Console<R, W> {
        let Session { human, .. } = self;
        human.into_prompt()
    }

    /// Shows the menu until the user quits.
    #[instrument(skip(self))]
    pub fn run_menu(&mut self) -> Result<()> {
        self.console().clear()?;
        let banner = self.console().renderer().banner();
        self.console().say(&banner)?;

        let kinds: Vec<OpponentKind> = OpponentKind::iter().collect();
        let mut entries = menu_entries();
        let quit = char::from(b'1' + kinds.len() as u8);
        entries.push((quit, "Quit".to_string()));
        let labels: Vec<(char, &str)> = entries
            .iter()
            .map(|(key, label)| (*key, label.as_str()))
            .collect();
        let question = format!("\nEnter your choice (1-{}): ", quit);

        loop {
            let menu = self.console().renderer().menu(&labels);
            self.console().say(&menu)?;
            let Some(choice) = self.console().ask(&question)? else {
                break;
            };
            let picked = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1));
            let opponent = match picked {
                Some(index) if index < kinds.len() => kinds[index],
                Some(index) if index == kinds.len() => break,
                _ => {
                    let text = self.console().renderer().error("Invalid choice. Please try again.");
                    self.console().say(&text)?;
                    continue;
                }
            };
            if self.play_round(opponent)? == Flow::Quit {
                break;
            }
        }

        let goodbye = self.console().renderer().goodbye();
        self.console().say(&goodbye)?;
        Ok(())
    }

    /// Plays rounds against one opponent until the user stops.
    pub fn run_fixed(&mut self, opponent: OpponentKind) -> Result<()> {
        while self.play_round(opponent)? == Flow::Continue {}
        let goodbye = self.console().renderer().goodbye();
        self.console().say(&goodbye)?;
        Ok(())
    }

    /// Plays one match, then asks whether to play again.
    pub fn play_round(&mut self, opponent: OpponentKind) -> Result<Flow> {
        if self.play_match(opponent)?.is_none() {
            return Ok(Flow::Quit);
        }
        let answer = self.console().ask("Play again? (y/n): ")?;
        Ok(match answer.map(|a| a.to_lowercase()) {
            Some(a) if a == "y" => Flow::Continue,
            _ => Flow::Quit,
        })
    }

    /// Plays a single match; `None` if the human left mid-game.
    #[instrument(skip(self), fields(match_number = self.matches + 1))]
    pub fn play_match(&mut self, opponent: OpponentKind) -> Result<Option<Outcome>> {
        self.matches += 1;
        let seed = (*self.config.seed()).map(|s| s.wrapping_add(self.matches));
        let mut computer = opponent.computer(seed);
        let human_side = *self.config.human_side();
        let delay = Duration::from_millis(*self.config.think_delay_ms());

        let mut game = Game::new();
        let grid = self.console().renderer().reference_grid();
        self.console().say(&grid)?;

        while game.status().outcome().is_none() {
            let side = game.to_move();
            let source: &mut dyn MoveSource = match computer.as_mut() {
                Some(ai) if side != human_side => &mut **ai,
                _ => &mut self.human,
            };
            if source.is_computer() && !delay.is_zero() {
                std::thread::sleep(delay);
            }

            let played = match game.play_turn(source) {
                Ok(played) => played,
                Err(MoveError::InputClosed) => {
                    info!("Player left the game");
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };
            debug!(%played, "Turn complete");

            let announce = self
                .console()
                .renderer()
                .move_made(played.player, played.position.to_index());
            self.console().show_board(game.board())?;
            self.console().say(&announce)?;
        }

        let outcome = game.status().outcome();
        if let Some(outcome) = outcome {
            let text = self.console().renderer().outcome(outcome);
            self.console().say(&text)?;
        }
        Ok(outcome)
    }
}
