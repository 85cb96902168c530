//! Terminal UI: frame driver, screens and drawing.

mod controller;
mod input;
mod screen;
mod screens;
mod ui;

pub use controller::Controller;
pub use screen::{Screen, ScreenTransition, SharedState};
pub use screens::{InGameScreen, SettingsOverlay, TutorialScreen};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use crystal_nim_core::{GameSettings, Timing};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{error, info, instrument};

/// Runs the interactive game until the player quits.
///
/// The terminal is restored before returning, whether the frame loop
/// succeeded or not.
#[instrument(skip_all)]
pub async fn run_tui(timing: Timing, settings: GameSettings) -> Result<()> {
    info!("Starting Crystal Nim TUI");

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(e).context("entering the alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            return Err(e).context("creating terminal");
        }
    };

    let mut controller = Controller::new(timing, settings);
    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Frame loop error");
    }
    res
}
