//! Game configuration loaded from TOML.

use crystal_nim_core::{GameSettings, NOMINAL_FRAME_RATE, Timing};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config file read when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "crystal_nim.toml";

/// Highest accepted `frame_rate`; above it a tick gets too short to schedule.
pub const MAX_FRAME_RATE: u32 = 1000;

/// Tunables for a play or simulate session.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct GameConfig {
    /// Nominal ticks per second every animation budget derives from.
    frame_rate: u32,
    /// How long the computer's proposal stays on screen.
    computer_pause_ms: u64,
    /// Most ticks a single slow frame may catch up.
    max_catch_up_ticks: u32,
    /// Random starting rows instead of 1, 3, 5, 7.
    randomize_piles: bool,
    /// Log file used while the terminal UI owns the screen.
    log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_rate: NOMINAL_FRAME_RATE,
            computer_pause_ms: 1000,
            max_catch_up_ticks: 15,
            randomize_piles: false,
            log_file: PathBuf::from("crystal_nim.log"),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(frame_rate = config.frame_rate, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when `None`.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(mut self, frame_rate: Option<u32>, randomize_piles: bool) -> Self {
        if let Some(rate) = frame_rate {
            self.frame_rate = rate;
        }
        self.randomize_piles |= randomize_piles;
        self
    }

    /// Rejects values the turn controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate < 2 {
            return Err(ConfigError::new(format!(
                "frame_rate must be at least 2, got {}",
                self.frame_rate
            )));
        }
        if self.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::new(format!(
                "frame_rate must be at most {MAX_FRAME_RATE}, got {}",
                self.frame_rate
            )));
        }
        if self.max_catch_up_ticks == 0 {
            return Err(ConfigError::new(
                "max_catch_up_ticks must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Tick budgets for the turn controller.
    pub fn timing(&self) -> Result<Timing, ConfigError> {
        self.validate()?;
        let pause = Timing::ticks_in(self.frame_rate, Duration::from_millis(self.computer_pause_ms));
        Ok(Timing::new(self.frame_rate, pause, self.max_catch_up_ticks))
    }

    /// Settings the first round starts with.
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            randomize_piles: self.randomize_piles,
        }
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
