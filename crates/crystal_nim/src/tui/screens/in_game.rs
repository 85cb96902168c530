//! In-game screen: draws whatever the turn controller reports.

use crystal_nim_core::{
    FrameInput, GameSettings, Layout, Phase, ROWS, Region, RegionKind, Snapshot, TurnOwner,
    TurnStateMachine,
};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
};
use tracing::instrument;

use crate::tui::screen::{Screen, ScreenTransition, SharedState};
use crate::tui::ui;

const STATUS_X: u16 = 46;
const CAPTION: Region = Region {
    x: 0,
    y: 9,
    width: 80,
    height: 1,
};

/// The table while a round is in progress or ending.
#[derive(Debug, Clone)]
pub struct InGameScreen {
    machine: TurnStateMachine,
    snapshot: Snapshot,
}

impl InGameScreen {
    /// Wraps an inactive turn controller.
    pub fn new(machine: TurnStateMachine) -> Self {
        let snapshot = machine.snapshot();
        Self { machine, snapshot }
    }

    /// Starts a round with `first` to move.
    pub fn enter(&mut self, first: TurnOwner) {
        self.machine.enter(first);
        self.snapshot = self.machine.snapshot();
    }

    /// Rebuilds the waiting piles after a settings change.
    pub fn regenerate(&mut self, settings: &GameSettings) {
        self.machine.regenerate(settings);
        self.snapshot = self.machine.snapshot();
    }

    /// Last state reported by the controller.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn render_table(&self, frame: &mut Frame, layout: &Layout) {
        let snap = &self.snapshot;
        for row in 0..ROWS {
            let rest = layout.token_rect(row, 0);
            ui::text(
                frame,
                0,
                rest.y + rest.height / 2,
                &(row + 1).to_string(),
                Style::default().fg(Color::DarkGray),
            );

            for col in 0..snap.piles.count(row) {
                let Some(x) = snap.token_x(layout, row, col) else {
                    continue;
                };
                let alpha = snap.token_alpha(row, col);
                if alpha <= 0.0 {
                    continue;
                }
                let region = Region::new(x.round() as u16, rest.y, rest.width, rest.height);
                let color = ui::blend(ui::ROW_COLORS[row], alpha);
                ui::crystal(frame, region, color, snap.is_selected(row, col));
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, layout: &Layout) {
        let snap = &self.snapshot;
        let label = Style::default().fg(Color::Gray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        ui::text(frame, STATUS_X, 4, "Turn:", label);
        ui::text(frame, STATUS_X + 8, 4, &snap.turn.to_string(), value);
        ui::text(frame, STATUS_X, 5, "Crystals left:", label);
        ui::text(frame, STATUS_X + 15, 5, &snap.piles.total().to_string(), value);

        let selection = snap
            .pending()
            .map(|mv| (mv.row(), mv.count()))
            .or_else(|| snap.hover.map(|hit| (hit.row, hit.col + 1)));
        if let Some((row, count)) = selection {
            ui::text(frame, STATUS_X, 7, "Row:", label);
            ui::text(frame, STATUS_X + 8, 7, &(row + 1).to_string(), value);
            ui::text(frame, STATUS_X, 8, "Remove:", label);
            ui::text(frame, STATUS_X + 8, 8, &count.to_string(), value);
        }

        if let Phase::Confirming { pending } = snap.phase {
            let question = match snap.turn {
                TurnOwner::Human => format!(
                    "Remove {} crystal{} from row {}?",
                    pending.count(),
                    if pending.count() == 1 { "" } else { "s" },
                    pending.row() + 1
                ),
                TurnOwner::Computer => "That's my turn, can I play?".to_string(),
            };
            ui::text(frame, STATUS_X, 11, &question, value);

            let enabled = snap.turn == TurnOwner::Human;
            let (accept, deny) = if enabled {
                (Color::Green, Color::Red)
            } else {
                (Color::DarkGray, Color::DarkGray)
            };
            ui::button(frame, layout.region(RegionKind::Accept), "✔ y", accept, false);
            ui::button(frame, layout.region(RegionKind::Deny), "✘ n", deny, false);
        } else if snap.phase == Phase::Idle && snap.turn == TurnOwner::Human {
            ui::text(frame, STATUS_X, 11, "Pick crystals to take.", label);
        }
    }

    fn render_round_end(&self, frame: &mut Frame, layout: &Layout) {
        let snap = &self.snapshot;
        let Some(caption) = snap.caption() else {
            return;
        };
        let color = match snap.winner() {
            Some(TurnOwner::Human) => (110, 255, 150),
            _ => (255, 90, 90),
        };
        ui::centered(
            frame,
            CAPTION,
            caption,
            Style::default()
                .fg(ui::blend(color, snap.alpha))
                .add_modifier(Modifier::BOLD),
        );

        if matches!(snap.phase, Phase::RoundEndPrompt { .. }) {
            ui::centered(
                frame,
                layout.region(RegionKind::PlayAgain),
                "Play again? (click here to play again)",
                Style::default().fg(ui::blend((255, 255, 255), snap.prompt_alpha)),
            );
        }
    }
}

impl Screen for InGameScreen {
    #[instrument(skip_all)]
    fn update(&mut self, input: &FrameInput, shared: &mut SharedState) -> ScreenTransition {
        self.snapshot = self
            .machine
            .advance(input, &mut shared.scene, &shared.settings);
        ScreenTransition::Stay
    }

    fn render(&self, frame: &mut Frame, shared: &SharedState) {
        ui::clear(frame);
        ui::text(
            frame,
            1,
            0,
            "CRYSTAL NIM",
            Style::default()
                .fg(ui::blend(ui::ROW_COLORS[0], 1.0))
                .add_modifier(Modifier::BOLD),
        );
        self.render_table(frame, &shared.layout);
        self.render_status(frame, &shared.layout);
        self.render_round_end(frame, &shared.layout);
        ui::text(
            frame,
            1,
            23,
            "mouse or arrows + Enter | y/n: accept/deny | q: quit",
            Style::default().fg(Color::DarkGray),
        );
    }
}
