//! Text rendering for the terminal.

use crossterm::style::{Color, Stylize, style};
use tictactoe_engine::{Board, Outcome, Player, Square};

/// Left padding that keeps the grid aligned under the banner.
const INDENT: &str = "          ";
const RULE_WIDTH: usize = 40;

/// Formats boards and messages, with or without colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, fg: Color) -> String {
        if self.color {
            style(text).with(fg).to_string()
        } else {
            text.to_string()
        }
    }

    fn mark(&self, player: Player) -> String {
        let cell = format!(" {} ", player);
        if !self.color {
            return cell;
        }
        let bg = match player {
            Player::X => Color::Blue,
            Player::O => Color::Red,
        };
        style(cell).with(Color::White).on(bg).to_string()
    }

    /// Start-up banner.
    pub fn banner(&self) -> String {
        let lines = [
            "╔════════════════════════════════════════╗",
            "║                                        ║",
            "║         TIC TAC TOE GAME               ║",
            "║                                        ║",
            "╚════════════════════════════════════════╝",
        ];
        lines
            .iter()
            .map(|line| self.paint(line, Color::Cyan))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The board with coloured marks.
    pub fn board(&self, board: &Board) -> String {
        let rule = self.paint(&"=".repeat(RULE_WIDTH), Color::Cyan);
        let mut out = format!(
            "\n{}\n{}\n{}\n\n",
            rule,
            self.paint(&format!("{}TIC TAC TOE", " ".repeat(12)), Color::Cyan),
            rule
        );
        for (row, cells) in board.squares().chunks(3).enumerate() {
            out.push_str(INDENT);
            let rendered: Vec<String> = cells
                .iter()
                .map(|square| match square {
                    Square::Occupied(player) => self.mark(*player),
                    Square::Empty => "   ".to_string(),
                })
                .collect();
            out.push_str(&rendered.join(self.paint("|", Color::White).as_str()));
            out.push('\n');
            if row < 2 {
                out.push_str(INDENT);
                out.push_str(&self.paint("---+---+---", Color::White));
                out.push('\n');
            }
        }
        out
    }

    /// Grid of cell numbers for reference.
    pub fn reference_grid(&self) -> String {
        let mut out = format!("\n{}\n", self.paint("Available positions:", Color::Green));
        for row in 0..3 {
            out.push_str(&format!(
                "{} {} | {} | {}\n",
                INDENT,
                row * 3,
                row * 3 + 1,
                row * 3 + 2
            ));
            if row < 2 {
                out.push_str(&format!("{}---+---+---\n", INDENT));
            }
        }
        out
    }

    /// Main menu.
    pub fn menu(&self, entries: &[(char, &str)]) -> String {
        let mut out = format!("\n{}\n", self.paint("Choose game mode:", Color::Yellow));
        for (key, label) in entries {
            out.push_str(&format!("{} {}\n", self.paint(&format!("{}.", key), Color::Green), label));
        }
        out
    }

    /// Announcement of a played move.
    pub fn move_made(&self, player: Player, index: usize) -> String {
        self.paint(&format!("{} makes move to position {}", player, index), Color::Green)
    }

    /// End-of-game banner.
    pub fn outcome(&self, outcome: Outcome) -> String {
        match outcome {
            Outcome::Winner(player) => {
                let rule = self.paint(&"=".repeat(RULE_WIDTH), Color::Yellow);
                let text = format!(" {} WINS! ", player);
                let text = if self.color {
                    let bg = match player {
                        Player::X => Color::Blue,
                        Player::O => Color::Red,
                    };
                    style(text).with(Color::White).on(bg).to_string()
                } else {
                    text
                };
                format!("{}\n{}\n{}", rule, text, rule)
            }
            Outcome::Draw => {
                let rule = self.paint(&"=".repeat(RULE_WIDTH), Color::Magenta);
                format!("{}\n{}\n{}", rule, self.paint("   IT'S A TIE!", Color::Magenta), rule)
            }
        }
    }

    /// Highlighted prompt text.
    pub fn prompt(&self, text: &str) -> String {
        self.paint(text, Color::Cyan)
    }

    /// Error text.
    pub fn error(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    /// Parting message.
    pub fn goodbye(&self) -> String {
        self.paint("Thanks for playing! Goodbye!", Color::Yellow)
    }
}
