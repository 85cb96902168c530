//! Settings overlay opened from the gear icon.

use crystal_nim_core::{GameSettings, Layout, Point, Region, RegionKind};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
};
use tracing::{debug, info, instrument};

use crate::tui::ui;

/// Window drawn around the checkbox.
const WINDOW: Region = Region {
    x: 20,
    y: 8,
    width: 40,
    height: 7,
};

/// Gear-toggled window with the "Random amount of crystals" checkbox.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsOverlay {
    open: bool,
}

impl SettingsOverlay {
    /// Creates a closed overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the window is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hides the window.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Handles a tap, returning true if the overlay consumed it.
    ///
    /// The gear toggles the window. While it is open the checkbox toggles
    /// random piles and every other tap is swallowed.
    #[instrument(skip(self, layout, settings))]
    pub fn handle_tap(&mut self, point: Point, layout: &Layout, settings: &mut GameSettings) -> bool {
        if layout.region(RegionKind::Gear).contains(point) {
            self.open = !self.open;
            info!(open = self.open, "Settings overlay toggled");
            return true;
        }
        if !self.open {
            return false;
        }
        if layout.region(RegionKind::SettingsCheckbox).contains(point) {
            settings.toggle_randomize();
        } else {
            debug!("Tap swallowed by settings overlay");
        }
        true
    }

    /// Draws the gear and, when open, the window.
    pub fn render(&self, frame: &mut Frame, layout: &Layout, settings: &GameSettings) {
        let gear_style = if self.open {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        ui::centered(frame, *layout.gear(), "[⚙ g]", gear_style);

        if !self.open {
            return;
        }
        ui::window(frame, WINDOW, " Settings ");
        let mark = if settings.randomize_piles { "x" } else { " " };
        ui::centered(
            frame,
            *layout.settings_checkbox(),
            &format!("[{}] Random amount of crystals", mark),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );
        ui::centered(
            frame,
            Region::new(WINDOW.x, WINDOW.y + WINDOW.height - 2, WINDOW.width, 1),
            "Applies from the next round",
            Style::default().fg(Color::DarkGray),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gear_opens_and_checkbox_toggles() {
        let layout = Layout::default();
        let mut settings = GameSettings::new();
        let mut overlay = SettingsOverlay::new();

        let checkbox = layout.settings_checkbox().center();
        assert!(!overlay.handle_tap(checkbox, &layout, &mut settings));
        assert!(!settings.randomize_piles);

        assert!(overlay.handle_tap(layout.gear().center(), &layout, &mut settings));
        assert!(overlay.is_open());
        assert!(overlay.handle_tap(checkbox, &layout, &mut settings));
        assert!(settings.randomize_piles);

        // Modal: taps elsewhere are swallowed.
        assert!(overlay.handle_tap(Point::new(0, 23), &layout, &mut settings));
        assert!(settings.randomize_piles);

        assert!(overlay.handle_tap(layout.gear().center(), &layout, &mut settings));
        assert!(!overlay.is_open());
    }
}
