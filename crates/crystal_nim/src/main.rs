//! Crystal Nim - unified CLI.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crystal_nim::{Cli, Command, GameConfig, PlayArgs, SimulateArgs, logging, simulate, tui};
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command() {
        Command::Play(args) => run_play(args).await,
        Command::Simulate(args) => run_simulate(args),
    }
}

/// Play interactively in the terminal.
async fn run_play(args: PlayArgs) -> Result<()> {
    let config = GameConfig::load(args.config.as_deref())
        .context("loading configuration")?
        .with_overrides(args.frame_rate, args.random_piles);

    logging::init_file_logging(config.log_file())?;
    info!(?config, "Configuration resolved");

    let timing = config.timing().context("validating configuration")?;
    tui::run_tui(timing, config.settings()).await
}

/// Play headless games and print the report.
#[instrument(skip_all, fields(games = args.games, seed = args.seed))]
fn run_simulate(args: SimulateArgs) -> Result<()> {
    logging::init_stderr_logging();

    let config = GameConfig::load(args.config.as_deref())
        .context("loading configuration")?
        .with_overrides(None, args.random_piles);
    let timing = config.timing().context("validating configuration")?;

    let report = simulate::run(
        timing,
        config.settings(),
        args.games,
        args.seed,
        args.computer_first,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
