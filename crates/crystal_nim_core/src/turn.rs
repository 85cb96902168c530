//! Who is about to move.

use serde::{Deserialize, Serialize};

/// Owner of the current turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum TurnOwner {
    /// The person at the keyboard.
    #[default]
    #[strum(to_string = "Player")]
    Human,
    /// The nim-sum engine.
    #[strum(to_string = "Computer")]
    Computer,
}

impl TurnOwner {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            TurnOwner::Human => TurnOwner::Computer,
            TurnOwner::Computer => TurnOwner::Human,
        }
    }
}
