//! Tutorial screen: the rules and who moves first.

use crystal_nim_core::{FrameInput, Point, Region, TurnOwner};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
};
use tracing::{info, instrument, trace};

use super::settings::SettingsOverlay;
use crate::tui::screen::{Screen, ScreenTransition, SharedState};
use crate::tui::ui;

const RULES: [&str; 6] = [
    "Four rows of crystals lie on the table.",
    "On your turn pick a row and take as many crystals as you like,",
    "always starting from the left end of the row.",
    "Confirm with the green button, or change your mind with the red one.",
    "Whoever takes the last crystal loses.",
    "Who should start?",
];

/// The two choices, left to right.
const CHOICES: [(TurnOwner, &str, Region); 2] = [
    (
        TurnOwner::Computer,
        "Computer",
        Region {
            x: 18,
            y: 17,
            width: 18,
            height: 3,
        },
    ),
    (
        TurnOwner::Human,
        "You",
        Region {
            x: 44,
            y: 17,
            width: 18,
            height: 3,
        },
    ),
];

/// Center of a choice button, used for keyboard taps.
pub fn choice_center(index: usize) -> Point {
    CHOICES[index.min(CHOICES.len() - 1)].2.center()
}

/// State for the tutorial screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct TutorialScreen {
    hover: Option<usize>,
    overlay: SettingsOverlay,
}

impl TutorialScreen {
    /// Creates the tutorial screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// The gear overlay.
    pub fn overlay(&self) -> &SettingsOverlay {
        &self.overlay
    }

    /// Mutable access for keyboard shortcuts.
    pub fn overlay_mut(&mut self) -> &mut SettingsOverlay {
        &mut self.overlay
    }
}

impl Screen for TutorialScreen {
    #[instrument(skip_all)]
    fn update(&mut self, input: &FrameInput, shared: &mut SharedState) -> ScreenTransition {
        self.hover = if self.overlay.is_open() {
            None
        } else {
            CHOICES
                .iter()
                .position(|(_, _, region)| region.contains(input.pointer))
        };

        if !input.click {
            return ScreenTransition::Stay;
        }
        if self
            .overlay
            .handle_tap(input.pointer, &shared.layout, &mut shared.settings)
        {
            return ScreenTransition::Stay;
        }

        match self.hover {
            Some(index) => {
                let first = CHOICES[index].0;
                info!(%first, "Opening turn chosen");
                ScreenTransition::StartRound { first }
            }
            None => {
                trace!(pointer = ?input.pointer, "Tap outside any choice");
                ScreenTransition::Stay
            }
        }
    }

    fn render(&self, frame: &mut Frame, shared: &SharedState) {
        ui::clear(frame);
        ui::centered(
            frame,
            Region::new(0, 2, 80, 1),
            "C R Y S T A L   N I M",
            Style::default()
                .fg(ui::blend(ui::ROW_COLORS[0], 1.0))
                .add_modifier(Modifier::BOLD),
        );

        for (i, line) in RULES.iter().enumerate() {
            ui::centered(
                frame,
                Region::new(0, 5 + 2 * i as u16, 80, 1),
                line,
                Style::default().fg(Color::White),
            );
        }

        for (index, (_, label, region)) in CHOICES.iter().enumerate() {
            let color = ui::blend(ui::ROW_COLORS[index + 2], 1.0);
            ui::button(frame, *region, label, color, self.hover == Some(index));
        }

        ui::text(
            frame,
            1,
            23,
            "mouse or arrows + Enter | g: settings | q: quit",
            Style::default().fg(Color::DarkGray),
        );

        self.overlay.render(frame, &shared.layout, &shared.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_choice_starts_round() {
        let mut screen = TutorialScreen::new();
        let mut shared = SharedState::default();

        let input = FrameInput::tap(choice_center(0), Duration::ZERO);
        assert_eq!(
            screen.update(&input, &mut shared),
            ScreenTransition::StartRound {
                first: TurnOwner::Computer
            }
        );

        let input = FrameInput::tap(choice_center(1), Duration::ZERO);
        assert_eq!(
            screen.update(&input, &mut shared),
            ScreenTransition::StartRound {
                first: TurnOwner::Human
            }
        );
    }

    #[test]
    fn test_overlay_blocks_choices() {
        let mut screen = TutorialScreen::new();
        let mut shared = SharedState::default();
        let gear = shared.layout.gear().center();

        screen.update(&FrameInput::tap(gear, Duration::ZERO), &mut shared);
        assert!(screen.overlay().is_open());

        let input = FrameInput::tap(choice_center(1), Duration::ZERO);
        assert_eq!(screen.update(&input, &mut shared), ScreenTransition::Stay);
    }

    #[test]
    fn test_hover_highlights_choice() {
        let mut screen = TutorialScreen::new();
        let mut shared = SharedState::default();
        screen.update(&FrameInput::hover(choice_center(1), Duration::ZERO), &mut shared);
        assert_eq!(screen.hover, Some(1));
    }
}
