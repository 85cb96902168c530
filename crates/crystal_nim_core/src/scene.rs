//! Which top-level screen receives frame ticks.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Top-level screens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum Scene {
    /// Rules and the "who starts?" choice.
    #[default]
    Tutorial,
    /// The turn controller is running.
    InGame,
    /// Nothing left to drive; the frame driver stops routing ticks.
    Finished,
}

/// Mode flag read by the frame driver every frame.
///
/// The tutorial screen switches to [`Scene::InGame`]; the turn controller
/// switches back to [`Scene::Tutorial`] when the player asks for another
/// round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneSwitch {
    current: Scene,
}

impl SceneSwitch {
    /// Starts on the tutorial screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen currently receiving ticks.
    pub fn current(&self) -> Scene {
        self.current
    }

    /// Routes subsequent ticks to `scene`.
    #[instrument(skip(self), fields(from = %self.current))]
    pub fn set(&mut self, scene: Scene) {
        if self.current != scene {
            info!(to = %scene, "Switching scene");
        }
        self.current = scene;
    }
}
