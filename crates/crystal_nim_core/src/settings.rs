//! Player-adjustable settings read at round reset.

use crate::piles::PileSet;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Options toggled from the settings overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSettings {
    /// Draw each row in `1..=7` instead of the `{1, 3, 5, 7}` opening.
    pub randomize_piles: bool,
}

impl GameSettings {
    /// Creates settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the "Random amount of crystals" checkbox.
    #[instrument(skip(self))]
    pub fn toggle_randomize(&mut self) {
        self.randomize_piles = !self.randomize_piles;
        info!(randomize_piles = self.randomize_piles, "Toggled random piles");
    }

    /// Fresh piles for a new round.
    pub fn starting_piles<R: Rng + ?Sized>(&self, rng: &mut R) -> PileSet {
        if self.randomize_piles {
            PileSet::random(rng)
        } else {
            PileSet::standard()
        }
    }
}
