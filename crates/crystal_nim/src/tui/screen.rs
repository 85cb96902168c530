//! Screen trait and transition type for the frame driver.

use crystal_nim_core::{FrameInput, GameSettings, Layout, SceneSwitch, TurnOwner};
use ratatui::Frame;

/// State every screen may read, owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SharedState {
    /// Which screen receives frame ticks.
    pub scene: SceneSwitch,
    /// Options read when a round is reset.
    pub settings: GameSettings,
    /// Fixed geometry for hit-testing and drawing.
    pub layout: Layout,
}

/// The result of handling one frame on a screen.
///
/// Screens return this from [`Screen::update`] to drive the
/// [`Controller`](super::Controller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen, no state change.
    Stay,
    /// Start a round with the given player to move.
    StartRound {
        /// Player who moves first.
        first: TurnOwner,
    },
}

/// Trait implemented by each top-level screen.
///
/// Each screen owns its own state, renders its UI and consumes one frame of
/// pointer input at a time. The controller calls these methods in the frame
/// loop for whichever screen the scene switch selects.
pub trait Screen {
    /// Consumes one frame of input.
    fn update(&mut self, input: &FrameInput, shared: &mut SharedState) -> ScreenTransition;

    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, shared: &SharedState);
}
