//! Individual screens of the terminal UI.

mod in_game;
mod settings;
mod tutorial;

pub use in_game::InGameScreen;
pub use settings::SettingsOverlay;
pub use tutorial::{TutorialScreen, choice_center};
