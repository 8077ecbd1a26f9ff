//! Play configuration loaded from TOML and overridden by flags.

use crate::cli::GameArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_engine::{OpponentKind, Player};
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Settings for interactive play.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Opponent used when no menu choice is made.
    #[serde(default = "default_opponent")]
    opponent: OpponentKind,

    /// Side the human plays against a computer.
    #[serde(default = "default_human_side")]
    human_side: Player,

    /// Seed for computer opponents; unseeded when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Pause after each computer move, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Whether to draw with terminal colours.
    #[serde(default = "default_color")]
    color: bool,
}

fn default_opponent() -> OpponentKind {
    OpponentKind::Optimal
}

fn default_human_side() -> Player {
    Player::X
}

fn default_think_delay_ms() -> u64 {
    400
}

fn default_color() -> bool {
    true
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            opponent: default_opponent(),
            human_side: default_human_side(),
            seed: None,
            think_delay_ms: default_think_delay_ms(),
            color: default_color(),
        }
    }
}

impl PlayConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(opponent = %config.opponent, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path`, or the default file if present, or built-in defaults.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides.
    pub fn apply(&mut self, args: &GameArgs) {
        if let Some(opponent) = args.opponent {
            self.opponent = opponent;
        }
        if let Some(side) = args.human_side {
            self.human_side = side;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if let Some(delay) = args.think_delay_ms {
            self.think_delay_ms = delay;
        }
        if args.no_color {
            self.color = false;
        }
    }

    /// Loads configuration for `args`, then applies its overrides.
    pub fn resolve(args: &GameArgs) -> Result<Self, ConfigError> {
        let mut config = Self::load(args.config.as_deref())?;
        config.apply(args);
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
