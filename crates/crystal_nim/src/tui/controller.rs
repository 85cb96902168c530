//! Frame driver: reads input, routes ticks by scene, draws.

use std::time::Instant;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use crystal_nim_core::{
    FrameInput, GameSettings, Layout, Phase, Point, RegionKind, Scene, SelectionMapper, Timing,
    TokenHit, TurnStateMachine,
};
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, info, instrument};

use super::input::{KeyAction, key_action, move_choice, move_cursor, snap_cursor};
use super::screen::{Screen, ScreenTransition, SharedState};
use super::screens::{InGameScreen, TutorialScreen, choice_center};

/// Controller that owns every screen and drives the frame loop.
///
/// Call [`Controller::run`] to start the event loop.
#[derive(Debug)]
pub struct Controller {
    shared: SharedState,
    timing: Timing,
    tutorial: TutorialScreen,
    in_game: InGameScreen,
    pointer: Point,
    click: bool,
    cursor: TokenHit,
    choice: usize,
}

impl Controller {
    /// Creates a controller starting on the tutorial screen.
    #[instrument(skip(settings))]
    pub fn new(timing: Timing, settings: GameSettings) -> Self {
        info!("Creating Controller");
        let layout = Layout::default();
        let machine = TurnStateMachine::new(timing, layout, &settings);
        Self {
            shared: SharedState {
                settings,
                layout,
                ..SharedState::default()
            },
            timing,
            tutorial: TutorialScreen::new(),
            in_game: InGameScreen::new(machine),
            pointer: choice_center(1),
            click: false,
            cursor: TokenHit::new(0, 0),
            choice: 1,
        }
    }

    /// Screen currently receiving frames.
    pub fn scene(&self) -> Scene {
        self.shared.scene.current()
    }

    /// The in-game screen.
    pub fn in_game(&self) -> &InGameScreen {
        &self.in_game
    }

    /// Current settings.
    pub fn settings(&self) -> &GameSettings {
        &self.shared.settings
    }

    /// Runs the frame loop until the user quits.
    ///
    /// One frame per nominal tick; the real elapsed time is passed on so a
    /// late frame catches up instead of slowing the animations.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!(rate = *self.timing.rate(), "Starting frame loop");
        let mut ticker = interval(self.timing.tick_length());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();

        loop {
            ticker.tick().await;

            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key.code),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            let now = Instant::now();
            self.frame(now - last);
            last = now;

            if self.scene() == Scene::Finished {
                info!("Frame loop finished");
                return Ok(());
            }

            terminal.draw(|f| self.render(f))?;
        }
    }

    /// Feeds one frame of buffered input and `elapsed` time to the active
    /// screen.
    pub fn frame(&mut self, elapsed: Duration) {
        let input = FrameInput::new(std::mem::take(&mut self.click), self.pointer, elapsed);
        let before = self.scene();

        let settings = self.shared.settings;
        let transition = match before {
            Scene::Tutorial => {
                let transition = self.tutorial.update(&input, &mut self.shared);
                if self.shared.settings != settings {
                    self.in_game.regenerate(&self.shared.settings);
                }
                transition
            }
            Scene::InGame => self.in_game.update(&input, &mut self.shared),
            Scene::Finished => ScreenTransition::Stay,
        };

        if let ScreenTransition::StartRound { first } = transition {
            self.in_game.enter(first);
            self.shared.scene.set(Scene::InGame);
            self.cursor = TokenHit::new(0, 0);
            self.point_at_cursor();
        }

        if before == Scene::InGame && self.scene() == Scene::Tutorial {
            debug!("Back on the tutorial screen");
            self.pointer = choice_center(self.choice);
        }
    }

    /// Pointer movement and left clicks.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.pointer = Point::new(mouse.column, mouse.row);
        if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            self.click = true;
        }
    }

    /// Keyboard shortcuts, expressed as pointer moves and taps.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, code: KeyCode) {
        let layout = self.shared.layout;
        let snapshot = *self.in_game.snapshot();

        match key_action(code) {
            KeyAction::Move(key) => match self.scene() {
                Scene::Tutorial if self.tutorial.overlay().is_open() => {
                    self.pointer = layout.region(RegionKind::SettingsCheckbox).center();
                }
                Scene::Tutorial => {
                    self.choice = move_choice(self.choice, key);
                    self.pointer = choice_center(self.choice);
                }
                Scene::InGame => {
                    self.cursor = move_cursor(self.cursor, key, &snapshot.piles);
                    self.pointer = SelectionMapper::new(&layout, &snapshot.piles)
                        .token_center(self.cursor.row, self.cursor.col);
                }
                Scene::Finished => {}
            },
            KeyAction::Tap => {
                if self.scene() == Scene::InGame
                    && matches!(snapshot.phase, Phase::RoundEndPrompt { .. })
                {
                    self.pointer = layout.region(RegionKind::PlayAgain).center();
                } else if self.scene() == Scene::InGame {
                    self.point_at_cursor();
                } else if self.scene() == Scene::Tutorial && self.tutorial.overlay().is_open() {
                    self.pointer = layout.region(RegionKind::SettingsCheckbox).center();
                }
                self.click = true;
            }
            KeyAction::Accept => self.tap_region(RegionKind::Accept),
            KeyAction::Deny => self.tap_region(RegionKind::Deny),
            KeyAction::Gear if self.scene() == Scene::Tutorial => self.tap_region(RegionKind::Gear),
            KeyAction::Back if self.tutorial.overlay().is_open() => {
                self.tutorial.overlay_mut().close();
            }
            KeyAction::Back | KeyAction::Quit => {
                info!("Quit requested");
                self.shared.scene.set(Scene::Finished);
            }
            KeyAction::Gear | KeyAction::Ignore => {}
        }
    }

    /// Moves the pointer onto the keyboard cursor, after snapping the cursor
    /// to a token that is still on the table.
    fn point_at_cursor(&mut self) {
        let piles = self.in_game.snapshot().piles;
        self.cursor = snap_cursor(self.cursor, &piles);
        self.pointer = SelectionMapper::new(&self.shared.layout, &piles)
            .token_center(self.cursor.row, self.cursor.col);
    }

    fn tap_region(&mut self, kind: RegionKind) {
        self.pointer = self.shared.layout.region(kind).center();
        self.click = true;
    }

    /// Draws the active screen.
    pub fn render(&self, frame: &mut Frame) {
        match self.scene() {
            Scene::Tutorial => self.tutorial.render(frame, &self.shared),
            Scene::InGame => self.in_game.render(frame, &self.shared),
            Scene::Finished => {}
        }
    }
}
