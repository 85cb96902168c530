//! Crystal Nim - terminal front end and headless runner.
//!
//! The game rules and the turn controller live in `crystal_nim_core`; this
//! crate adds configuration, logging, the terminal frame driver with its
//! tutorial and settings screens, and a `simulate` runner.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod logging;
pub mod simulate;
pub mod tui;

pub use cli::{Cli, Command, PlayArgs, SimulateArgs};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GameConfig};
pub use simulate::{GameRecord, SimulationReport};
