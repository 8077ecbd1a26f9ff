//! Line-oriented console used for human players and menus.

use crate::render::Renderer;
use crossterm::{cursor::MoveTo, execute, terminal::{Clear, ClearType}};
use std::io::{self, BufRead, Write};
use tictactoe_engine::{Board, MoveError, Player, Prompt};
use tracing::warn;

/// A reader and writer pair with a renderer.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    renderer: Renderer,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console that never clears the screen.
    pub fn new(input: R, output: W, renderer: Renderer) -> Self {
        Self {
            input,
            output,
            renderer,
            clear_screen: false,
        }
    }

    /// Clears the terminal at start-up and before each board, as an
    /// interactive session does.
    pub fn clearing(mut self) -> Self {
        self.clear_screen = true;
        self
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    /// Returns the output sink.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Writes a line.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    /// Writes `question` and reads one trimmed line; `None` at end of input.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", self.renderer.prompt(question))?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Clears the screen if enabled.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Clears the screen if enabled, then draws the board.
    pub fn show_board(&mut self, board: &Board) -> io::Result<()> {
        self.clear()?;
        let text = self.renderer.board(board);
        self.say(&text)
    }
}

impl<R: BufRead, W: Write> Prompt for Console<R, W> {
    fn read_move(&mut self, _board: &Board, side: Player) -> Option<String> {
        let question = format!("Your turn ({}). Enter position (0-8): ", side);
        match self.ask(&question) {
            Ok(Some(answer)) if matches!(answer.as_str(), "q" | "quit") => None,
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Failed to read move");
                None
            }
        }
    }

    fn reject(&mut self, error: &MoveError) {
        let text = self
            .renderer
            .error(&format!("Invalid input ({}). Try again.", error));
        if let Err(e) = self.say(&text) {
            warn!(error = %e, "Failed to write rejection");
        }
    }
}
