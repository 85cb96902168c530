//! Command-line interface for crystal_nim.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Crystal Nim - take crystals in turns, whoever takes the last one loses
#[derive(Parser, Debug)]
#[command(name = "crystal_nim")]
#[command(about = "Play Nim against an optimal computer in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The subcommand, with `play` filled in when none was given.
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Play(PlayArgs::default()))
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play interactively in the terminal
    Play(PlayArgs),

    /// Play many games headlessly with a random stand-in for the human
    Simulate(SimulateArgs),
}

/// Options for `play`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayArgs {
    /// Path to the TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Draw each row's size at random instead of 1, 3, 5, 7
    #[arg(long)]
    pub random_piles: bool,

    /// Nominal ticks per second (animation speed is wall-clock based)
    #[arg(long)]
    pub frame_rate: Option<u32>,
}

/// Options for `simulate`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SimulateArgs {
    /// Path to the TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of games to play
    #[arg(short, long, default_value = "100")]
    pub games: u32,

    /// Seed for the stand-in player and the random piles
    #[arg(short, long, default_value = "0")]
    pub seed: u64,

    /// Draw each row's size at random instead of 1, 3, 5, 7
    #[arg(long)]
    pub random_piles: bool,

    /// Let the computer move first in every game
    #[arg(long)]
    pub computer_first: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
