//! Frame-driven turn controller.
//!
//! [`TurnStateMachine`] owns the pile set, the current [`Phase`] and the
//! animation counters. The frame driver calls [`TurnStateMachine::advance`]
//! once per rendered frame with that frame's pointer input and elapsed wall
//! time, and draws the returned [`Snapshot`].
//!
//! One turn always visits `Idle → Confirming → Removing → Shifting`, then
//! either returns to `Idle` with the other player to move or, once the last
//! token is gone, enters `RoundEndFadeIn → RoundEndPrompt`.

use crate::action::Move;
use crate::clock::{AnimationClock, FrameClock, Timing};
use crate::engine::NimEngine;
use crate::invariants::{RemovalContract, assert_invariants};
use crate::layout::{Layout, Point, RegionKind, SelectionMapper, TokenHit};
use crate::piles::PileSet;
use crate::scene::{Scene, SceneSwitch};
use crate::settings::GameSettings;
use crate::turn::TurnOwner;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::EnumDiscriminants;
use tracing::{debug, info, instrument, trace};

/// Current step of the turn controller.
///
/// Each variant carries exactly the data that step needs, so a pending move
/// exists only while one is being confirmed or animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(PhaseKind), derive(Hash, Serialize, Deserialize, strum::Display))]
pub enum Phase {
    /// Waiting for the human to tap a token.
    Idle,
    /// Accept/deny affordances are shown for `pending`.
    Confirming {
        /// Move awaiting confirmation.
        pending: Move,
    },
    /// The removed prefix fades out.
    Removing {
        /// Move being animated.
        pending: Move,
    },
    /// The surviving tokens slide left to close the gap.
    Shifting {
        /// Move applied when the shift completes.
        pending: Move,
    },
    /// The win/lose caption fades in.
    RoundEndFadeIn {
        /// Player who did not take the last token.
        winner: TurnOwner,
    },
    /// The "play again" prompt pulses until tapped.
    RoundEndPrompt {
        /// Player who did not take the last token.
        winner: TurnOwner,
    },
}

impl Phase {
    /// Move being confirmed or animated, if any.
    pub fn pending(&self) -> Option<Move> {
        match *self {
            Phase::Confirming { pending }
            | Phase::Removing { pending }
            | Phase::Shifting { pending } => Some(pending),
            _ => None,
        }
    }

    /// Round winner once the round has ended.
    pub fn winner(&self) -> Option<TurnOwner> {
        match *self {
            Phase::RoundEndFadeIn { winner } | Phase::RoundEndPrompt { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Pointer input and elapsed time for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_new::new)]
pub struct FrameInput {
    /// A click or tap happened this frame.
    pub click: bool,
    /// Pointer position, also used for hover.
    pub pointer: Point,
    /// Wall time since the previous frame.
    pub elapsed: Duration,
}

impl FrameInput {
    /// Frame without a click; the pointer rests at `pointer`.
    pub fn hover(pointer: Point, elapsed: Duration) -> Self {
        Self::new(false, pointer, elapsed)
    }

    /// Frame with a click at `pointer`.
    pub fn tap(pointer: Point, elapsed: Duration) -> Self {
        Self::new(true, pointer, elapsed)
    }
}

/// Read-only view of the controller handed to the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    /// Current phase with its pending move or winner.
    pub phase: Phase,
    /// Live pile counts. The pending move is not applied until its shift
    /// completes.
    pub piles: PileSet,
    /// Player to move.
    pub turn: TurnOwner,
    /// Token under the pointer while the human may select.
    pub hover: Option<TokenHit>,
    /// Removal fade during `Removing`, caption fade during the round end.
    pub alpha: f32,
    /// Pulsing alpha of the "play again" prompt.
    pub prompt_alpha: f32,
    /// Distance still to slide during `Shifting`.
    pub shift_offset: f32,
    /// False once "play again" handed control back to the tutorial.
    pub active: bool,
}

impl Snapshot {
    /// Phase without its payload.
    pub fn kind(&self) -> PhaseKind {
        PhaseKind::from(self.phase)
    }

    /// Move being confirmed or animated.
    pub fn pending(&self) -> Option<Move> {
        self.phase.pending()
    }

    /// Round winner, once known.
    pub fn winner(&self) -> Option<TurnOwner> {
        self.phase.winner()
    }

    /// Caption shown at the round end, from the human's point of view.
    pub fn caption(&self) -> Option<&'static str> {
        self.winner().map(|winner| match winner {
            TurnOwner::Human => "YOU WIN!!!",
            TurnOwner::Computer => "YOU LOSE!!!",
        })
    }

    /// Opacity of one token.
    ///
    /// The removed prefix fades out while `Removing` and is gone while
    /// `Shifting`; every other token is opaque.
    pub fn token_alpha(&self, row: usize, col: u8) -> f32 {
        match self.phase {
            Phase::Removing { pending } if row == pending.row() && col < pending.count() => {
                self.alpha
            }
            Phase::Shifting { pending } if row == pending.row() && col < pending.count() => 0.0,
            _ => 1.0,
        }
    }

    /// Horizontal position of a token, or `None` if it is not drawn.
    ///
    /// While `Shifting`, the survivors of the affected row sit `shift_offset`
    /// to the right of their final columns.
    pub fn token_x(&self, layout: &Layout, row: usize, col: u8) -> Option<f32> {
        if col >= self.piles.count(row) {
            return None;
        }
        let origin = f32::from(layout.grid_origin().x);
        let width = f32::from(*layout.token_width());

        match self.phase {
            Phase::Shifting { pending } if row == pending.row() => {
                if col < pending.count() {
                    None
                } else {
                    let settled = f32::from(col - pending.count());
                    Some(origin + self.shift_offset + settled * width)
                }
            }
            _ => Some(origin + f32::from(col) * width),
        }
    }

    /// True if the token is part of the hovered or pending selection.
    pub fn is_selected(&self, row: usize, col: u8) -> bool {
        if let Some(pending) = self.pending() {
            return row == pending.row() && col < pending.count();
        }
        self.hover
            .is_some_and(|hit| hit.row == row && col <= hit.col)
    }
}

/// Single owned controller for one game table.
///
/// Pile set, phase and animation counters change only inside
/// [`advance`](Self::advance), [`enter`](Self::enter) and the reset
/// triggered by "play again".
#[derive(Debug, Clone)]
pub struct TurnStateMachine {
    timing: Timing,
    layout: Layout,
    piles: PileSet,
    phase: Phase,
    turn: TurnOwner,
    clock: AnimationClock,
    frames: FrameClock,
    hover: Option<TokenHit>,
    active: bool,
    rng: StdRng,
}

impl TurnStateMachine {
    /// Creates an inactive controller with fresh starting piles.
    pub fn new(timing: Timing, layout: Layout, settings: &GameSettings) -> Self {
        Self::with_rng(timing, layout, settings, StdRng::from_os_rng())
    }

    /// Like [`new`](Self::new) with reproducible random piles.
    pub fn with_seed(timing: Timing, layout: Layout, settings: &GameSettings, seed: u64) -> Self {
        Self::with_rng(timing, layout, settings, StdRng::seed_from_u64(seed))
    }

    /// Replaces the starting piles of the next round with a fixed opening.
    ///
    /// # Panics
    ///
    /// Panics once a round is running.
    pub fn with_piles(mut self, piles: PileSet) -> Self {
        assert!(!self.active, "piles are fixed while a round is running");
        self.piles = piles;
        self
    }

    /// Rebuilds the waiting piles from `settings`.
    ///
    /// Lets a settings change made on the tutorial screen apply to the very
    /// next round. Ignored while a round is running.
    #[instrument(skip(self))]
    pub fn regenerate(&mut self, settings: &GameSettings) {
        if self.active {
            debug!("Round running, piles kept");
            return;
        }
        self.piles = settings.starting_piles(&mut self.rng);
        debug!(piles = %self.piles, "Piles regenerated");
    }

    fn with_rng(timing: Timing, layout: Layout, settings: &GameSettings, mut rng: StdRng) -> Self {
        let piles = settings.starting_piles(&mut rng);
        Self {
            timing,
            layout,
            piles,
            phase: Phase::Idle,
            turn: TurnOwner::default(),
            clock: AnimationClock::new(),
            frames: FrameClock::new(&timing),
            hover: None,
            active: false,
            rng,
        }
    }

    /// Starts a round with `first` to move.
    ///
    /// Called by the tutorial screen. If the computer moves first its
    /// proposal is ready before the first frame.
    #[instrument(skip(self), fields(piles = %self.piles))]
    pub fn enter(&mut self, first: TurnOwner) {
        assert!(!self.piles.is_empty(), "cannot start a round without tokens");
        self.turn = first;
        self.phase = Phase::Idle;
        self.clock = AnimationClock::new();
        self.frames.reset();
        self.hover = None;
        self.active = true;
        info!(first = %first, "Round started");
        self.settle();
    }

    /// Advances one rendered frame.
    ///
    /// Pointer input is handled once, then the frame's elapsed time is spent
    /// as whole ticks on the timed phases. The scene switch is written only
    /// when "play again" hands control back to the tutorial.
    #[instrument(skip_all, fields(phase = %self.kind(), turn = %self.turn))]
    pub fn advance(
        &mut self,
        input: &FrameInput,
        scene: &mut SceneSwitch,
        settings: &GameSettings,
    ) -> Snapshot {
        if self.active {
            self.handle_input(input, scene, settings);
        }

        if self.active {
            let ticks = self.frames.ticks_for(input.elapsed);
            for _ in 0..ticks {
                self.step();
            }
        }

        self.snapshot()
    }

    /// Current state for the renderer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            piles: self.piles,
            turn: self.turn,
            hover: self.hover,
            alpha: *self.clock.alpha(),
            prompt_alpha: *self.clock.prompt_alpha(),
            shift_offset: *self.clock.shift_offset(),
            active: self.active,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current phase without its payload.
    pub fn kind(&self) -> PhaseKind {
        PhaseKind::from(self.phase)
    }

    /// Live pile set.
    pub fn piles(&self) -> &PileSet {
        &self.piles
    }

    /// Player to move.
    pub fn turn(&self) -> TurnOwner {
        self.turn
    }

    /// Geometry used for hit-testing.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Tick budgets.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// False until [`enter`](Self::enter) and again after "play again".
    pub fn is_active(&self) -> bool {
        self.active
    }

    // ─────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────

    fn handle_input(&mut self, input: &FrameInput, scene: &mut SceneSwitch, settings: &GameSettings) {
        let (layout, piles) = (self.layout, self.piles);
        let mapper = SelectionMapper::new(&layout, &piles);

        match (self.phase, self.turn) {
            (Phase::Idle, TurnOwner::Human) => {
                self.hover = mapper.hit_token(input.pointer);
                if input.click {
                    if let Some(hit) = self.hover {
                        let pending = Move::from_selection(hit.row, hit.col);
                        debug!(%pending, "Human selected");
                        self.transition(Phase::Confirming { pending });
                    } else {
                        trace!(pointer = ?input.pointer, "Tap outside any token");
                    }
                }
            }
            (Phase::Confirming { pending }, TurnOwner::Human) if input.click => {
                if mapper.hit_region(input.pointer, RegionKind::Accept) {
                    self.begin_removal(pending);
                } else if mapper.hit_region(input.pointer, RegionKind::Deny) {
                    debug!(%pending, "Human denied");
                    self.transition(Phase::Idle);
                    self.hover = mapper.hit_token(input.pointer);
                } else {
                    trace!(pointer = ?input.pointer, "Tap outside accept/deny");
                }
            }
            (Phase::RoundEndPrompt { .. }, _) if input.click => {
                if mapper.hit_region(input.pointer, RegionKind::PlayAgain) {
                    self.play_again(scene, settings);
                } else {
                    trace!(pointer = ?input.pointer, "Tap outside play-again prompt");
                }
            }
            _ => {
                if input.click {
                    trace!(phase = %self.kind(), "Tap ignored");
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Ticks
    // ─────────────────────────────────────────────────────────────

    fn step(&mut self) {
        let full = self.timing.full();
        let half = self.timing.half();

        match self.phase {
            Phase::Idle => {}
            Phase::Confirming { pending } => {
                if self.turn == TurnOwner::Computer
                    && self.clock.tick() >= *self.timing.computer_pause()
                {
                    debug!(%pending, "Computer move auto-accepted");
                    self.begin_removal(pending);
                }
            }
            Phase::Removing { pending } => {
                if self.clock.tick() < full {
                    self.clock.fade_out();
                } else {
                    self.begin_shift(pending);
                }
            }
            Phase::Shifting { pending } => {
                if self.clock.tick() <= full {
                    self.clock.shift();
                } else {
                    self.apply(pending);
                }
            }
            Phase::RoundEndFadeIn { winner } => {
                self.clock.fade_in();
                if self.clock.tick() >= half {
                    self.clock.begin_pulse();
                    self.transition(Phase::RoundEndPrompt { winner });
                }
            }
            Phase::RoundEndPrompt { .. } => self.clock.pulse(half),
        }
    }

    fn begin_removal(&mut self, pending: Move) {
        self.clock.begin_fade_out(self.timing.full());
        self.transition(Phase::Removing { pending });
    }

    fn begin_shift(&mut self, pending: Move) {
        let whole_row = pending.count() == self.piles.count(pending.row());
        let distance = f32::from(pending.count()) * f32::from(*self.layout.token_width());
        self.clock.begin_shift(distance, self.timing.full(), whole_row);
        self.transition(Phase::Shifting { pending });
    }

    /// Applies the move, flips the turn and checks for the round end.
    #[instrument(skip(self), fields(mover = %self.turn))]
    fn apply(&mut self, pending: Move) {
        if let Err(e) = RemovalContract::pre(&self.piles, &pending) {
            panic!("state machine produced an illegal move {}: {}", pending, e);
        }

        let before = self.piles;
        self.piles.remove(pending);

        if cfg!(debug_assertions) {
            assert_invariants(&self.piles);
            if let Err(violation) = RemovalContract::post(&before, &self.piles, &pending) {
                panic!("{}", violation);
            }
        }

        let mover = self.turn;
        self.turn = mover.opponent();
        info!(%pending, piles = %self.piles, "Move applied");

        match NimEngine::winner(&self.piles, mover) {
            Some(winner) => {
                info!(%winner, "Round over");
                self.clock.begin_fade_in(self.timing.half());
                self.transition(Phase::RoundEndFadeIn { winner });
            }
            None => {
                self.transition(Phase::Idle);
                self.settle();
            }
        }
    }

    /// On the computer's turn `Idle` is left in the same tick it is entered.
    fn settle(&mut self) {
        if self.phase != Phase::Idle || self.turn != TurnOwner::Computer {
            return;
        }
        let pending = NimEngine::compute_optimal_move(&self.piles);
        debug!(%pending, "Computer proposes");
        self.transition(Phase::Confirming { pending });
    }

    fn play_again(&mut self, scene: &mut SceneSwitch, settings: &GameSettings) {
        self.piles = settings.starting_piles(&mut self.rng);
        self.clock = AnimationClock::new();
        self.frames.reset();
        self.hover = None;
        self.active = false;
        self.transition(Phase::Idle);
        info!(piles = %self.piles, "Play again, back to tutorial");
        scene.set(Scene::Tutorial);
    }

    fn transition(&mut self, next: Phase) {
        debug!(from = %self.kind(), to = %PhaseKind::from(next), "Phase transition");
        if !matches!(next, Phase::Idle) {
            self.hover = None;
        }
        if matches!(next, Phase::Confirming { .. }) {
            self.clock.restart();
        }
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(piles: [u8; 4]) -> TurnStateMachine {
        TurnStateMachine::with_seed(Timing::new(4, 2, 8), Layout::default(), &GameSettings::new(), 7)
            .with_piles(PileSet::from_counts(piles))
    }

    #[test]
    fn test_inactive_until_entered() {
        let mut m = machine([1, 3, 5, 7]);
        let mut scene = SceneSwitch::new();
        let tick = m.timing().tick_length();
        let snap = m.advance(&FrameInput::tap(Point::new(2, 4), tick), &mut scene, &GameSettings::new());
        assert!(!snap.active);
        assert_eq!(snap.kind(), PhaseKind::Idle);
    }

    #[test]
    fn test_regenerate_follows_settings_until_round_starts() {
        let mut m = machine([1, 1, 1, 1]);
        m.regenerate(&GameSettings::new());
        assert_eq!(*m.piles(), PileSet::standard());

        m.enter(TurnOwner::Human);
        let mut random = GameSettings::new();
        random.toggle_randomize();
        m.regenerate(&random);
        assert_eq!(*m.piles(), PileSet::standard());
    }

    #[test]
    fn test_computer_first_proposes_immediately() {
        let mut m = machine([1, 3, 5, 7]);
        m.enter(TurnOwner::Computer);
        assert_eq!(m.phase(), Phase::Confirming { pending: Move::new(0, 1) });
    }

    #[test]
    fn test_token_x_slides_survivors() {
        let layout = Layout::default();
        let snap = Snapshot {
            phase: Phase::Shifting { pending: Move::new(3, 2) },
            piles: PileSet::standard(),
            turn: TurnOwner::Human,
            hover: None,
            alpha: 1.0,
            prompt_alpha: 0.0,
            shift_offset: 10.0,
            active: true,
        };
        assert_eq!(snap.token_x(&layout, 3, 0), None);
        // Column 2 is the first survivor; with the full offset left it sits
        // where it started.
        assert_eq!(snap.token_x(&layout, 3, 2), Some(12.0));
        assert_eq!(snap.token_x(&layout, 2, 2), Some(12.0));
        assert_eq!(snap.token_alpha(3, 1), 0.0);
        assert_eq!(snap.token_alpha(3, 2), 1.0);
    }

    #[test]
    fn test_caption_is_from_human_view() {
        let mut snap = machine([1, 3, 5, 7]).snapshot();
        assert_eq!(snap.caption(), None);
        snap.phase = Phase::RoundEndPrompt { winner: TurnOwner::Human };
        assert_eq!(snap.caption(), Some("YOU WIN!!!"));
        snap.phase = Phase::RoundEndFadeIn { winner: TurnOwner::Computer };
        assert_eq!(snap.caption(), Some("YOU LOSE!!!"));
    }
}
