//! Tests for the frame-driven turn controller.

use std::time::Duration;

use crystal_nim_core::{
    FrameInput, GameSettings, Layout, Move, Phase, PhaseKind, PileSet, Point, Scene, SceneSwitch,
    SelectionMapper, Snapshot, Timing, TurnOwner, TurnStateMachine,
};

// Four ticks per second: removal and shift take four ticks, the caption fade
// and each pulse half take two, the computer waits two ticks before playing.
const TICK: Duration = Duration::from_millis(250);

struct Table {
    machine: TurnStateMachine,
    scene: SceneSwitch,
    settings: GameSettings,
}

impl Table {
    fn new(piles: [u8; 4], first: TurnOwner) -> Self {
        let settings = GameSettings::new();
        let mut machine =
            TurnStateMachine::with_seed(Timing::new(4, 2, 8), Layout::default(), &settings, 42)
                .with_piles(PileSet::from_counts(piles));
        let mut scene = SceneSwitch::new();
        scene.set(Scene::InGame);
        machine.enter(first);
        Self {
            machine,
            scene,
            settings,
        }
    }

    fn frame(&mut self, input: FrameInput) -> Snapshot {
        self.machine.advance(&input, &mut self.scene, &self.settings)
    }

    fn tick(&mut self) -> Snapshot {
        self.frame(FrameInput::hover(Point::new(0, 0), TICK))
    }

    fn tap(&mut self, point: Point) -> Snapshot {
        self.frame(FrameInput::tap(point, Duration::ZERO))
    }

    fn tap_token(&mut self, row: usize, col: u8) -> Snapshot {
        let layout = *self.machine.layout();
        let piles = *self.machine.piles();
        let point = SelectionMapper::new(&layout, &piles).token_center(row, col);
        self.tap(point)
    }

    fn tap_accept(&mut self) -> Snapshot {
        let point = self.machine.layout().accept().center();
        self.tap(point)
    }

    fn tap_deny(&mut self) -> Snapshot {
        let point = self.machine.layout().deny().center();
        self.tap(point)
    }

    /// Ticks until the phase changes, returning how many ticks it took.
    fn ticks_in_phase(&mut self) -> u32 {
        let start = self.machine.kind();
        let mut ticks = 0;
        while self.machine.kind() == start {
            self.tick();
            ticks += 1;
            assert!(ticks < 100, "stuck in {start}");
        }
        ticks
    }
}

#[test]
fn test_human_turn_visits_every_phase_once() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    let mut kinds = vec![table.machine.kind()];

    kinds.push(table.tap_token(3, 1).kind());
    kinds.push(table.tap_accept().kind());
    while table.machine.turn() == TurnOwner::Human {
        kinds.push(table.tick().kind());
    }
    kinds.dedup();

    // The computer's Idle is left in the tick it is entered.
    assert_eq!(
        kinds,
        vec![
            PhaseKind::Idle,
            PhaseKind::Confirming,
            PhaseKind::Removing,
            PhaseKind::Shifting,
            PhaseKind::Confirming,
        ]
    );
    assert_eq!(table.machine.piles().counts(), &[1, 3, 5, 5]);
}

#[test]
fn test_tap_selects_prefix() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    let snap = table.tap_token(2, 3);
    assert_eq!(snap.phase, Phase::Confirming { pending: Move::new(2, 4) });
    assert!(snap.is_selected(2, 0));
    assert!(snap.is_selected(2, 3));
    assert!(!snap.is_selected(2, 4));
}

#[test]
fn test_hover_reports_token_under_pointer() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    let layout = *table.machine.layout();
    let piles = *table.machine.piles();
    let point = SelectionMapper::new(&layout, &piles).token_center(1, 2);

    let snap = table.frame(FrameInput::hover(point, Duration::ZERO));
    assert_eq!(snap.kind(), PhaseKind::Idle);
    assert_eq!(snap.hover.map(|h| (h.row, h.col)), Some((1, 2)));
    assert!(snap.is_selected(1, 1));
}

#[test]
fn test_tap_on_empty_space_is_ignored() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    // Right of the single token in row 0.
    let snap = table.tap(Point::new(9, 5));
    assert_eq!(snap.kind(), PhaseKind::Idle);
}

#[test]
fn test_deny_returns_to_idle_without_changes() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    table.tap_token(3, 6);
    let snap = table.tap_deny();
    assert_eq!(snap.kind(), PhaseKind::Idle);
    assert_eq!(snap.pending(), None);
    assert_eq!(snap.piles, PileSet::standard());
    assert_eq!(snap.turn, TurnOwner::Human);
}

#[test]
fn test_confirming_waits_for_human() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    table.tap_token(3, 0);
    for _ in 0..20 {
        assert_eq!(table.tick().kind(), PhaseKind::Confirming);
    }
}

#[test]
fn test_removal_fades_selected_prefix() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    table.tap_token(3, 1);
    let snap = table.tap_accept();
    assert_eq!(snap.token_alpha(3, 0), 1.0);

    let snap = table.tick();
    assert_eq!(snap.kind(), PhaseKind::Removing);
    assert!((snap.token_alpha(3, 0) - 0.75).abs() < 1e-6);
    assert!((snap.token_alpha(3, 1) - 0.75).abs() < 1e-6);
    assert_eq!(snap.token_alpha(3, 2), 1.0);
    assert_eq!(snap.token_alpha(2, 0), 1.0);
}

#[test]
fn test_phase_durations() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    table.tap_token(3, 1);
    table.tap_accept();
    assert_eq!(table.ticks_in_phase(), 4, "removal lasts one second");
    assert_eq!(table.ticks_in_phase(), 5, "shift slides four ticks, then applies");
    assert_eq!(table.machine.kind(), PhaseKind::Confirming);
    assert_eq!(table.ticks_in_phase(), 2, "computer pause");
}

#[test]
fn test_shift_slides_survivors_to_origin() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    let layout = *table.machine.layout();
    let origin = f32::from(layout.grid_origin().x);
    let width = f32::from(*layout.token_width());

    table.tap_token(3, 1);
    table.tap_accept();
    let mut snap = table.tick();
    while snap.kind() == PhaseKind::Removing {
        snap = table.tick();
    }

    // Shift just began: survivors are where they were.
    assert_eq!(snap.token_x(&layout, 3, 0), None);
    assert_eq!(snap.token_x(&layout, 3, 2), Some(origin + 2.0 * width));

    for _ in 0..4 {
        snap = table.tick();
    }
    assert_eq!(snap.kind(), PhaseKind::Shifting);
    assert_eq!(snap.token_x(&layout, 3, 2), Some(origin));
    assert_eq!(snap.token_x(&layout, 3, 6), Some(origin + 4.0 * width));
}

#[test]
fn test_whole_row_shift_takes_no_time() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    table.tap_token(0, 0);
    table.tap_accept();
    assert_eq!(table.ticks_in_phase(), 4);
    assert_eq!(table.machine.kind(), PhaseKind::Shifting);
    assert_eq!(table.ticks_in_phase(), 1);
    assert_eq!(table.machine.piles().counts(), &[0, 3, 5, 7]);
}

#[test]
fn test_computer_auto_accepts_and_ignores_taps() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Computer);
    let snap = table.machine.snapshot();
    assert_eq!(snap.phase, Phase::Confirming { pending: Move::new(0, 1) });

    assert_eq!(table.tap_deny().kind(), PhaseKind::Confirming);
    assert_eq!(table.tap_accept().kind(), PhaseKind::Confirming);

    table.tick();
    assert_eq!(table.tick().kind(), PhaseKind::Removing);
}

#[test]
fn test_turn_flips_after_each_removal() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Computer);
    while table.machine.turn() == TurnOwner::Computer {
        table.tick();
    }
    assert_eq!(table.machine.kind(), PhaseKind::Idle);
    assert_eq!(table.machine.piles().counts(), &[0, 3, 5, 7]);
    assert_eq!(table.machine.piles().total(), 15);
}

#[test]
fn test_round_end_and_play_again() {
    let mut table = Table::new([0, 0, 0, 1], TurnOwner::Human);
    table.tap_token(3, 0);
    table.tap_accept();

    let mut snap = table.tick();
    while snap.kind() != PhaseKind::RoundEndFadeIn {
        snap = table.tick();
    }
    assert!(snap.piles.is_empty());
    assert_eq!(snap.winner(), Some(TurnOwner::Computer));
    assert_eq!(snap.caption(), Some("YOU LOSE!!!"));
    assert_eq!(snap.alpha, 0.0);

    snap = table.tick();
    assert!((snap.alpha - 0.5).abs() < 1e-6);
    snap = table.tick();
    assert_eq!(snap.kind(), PhaseKind::RoundEndPrompt);
    assert_eq!(snap.alpha, 1.0);

    // The prompt brightens for half a second, then dims again.
    snap = table.tick();
    assert!((snap.prompt_alpha - 0.5).abs() < 1e-6);
    snap = table.tick();
    assert!((snap.prompt_alpha - 1.0).abs() < 1e-6);
    snap = table.tick();
    assert!((snap.prompt_alpha - 0.5).abs() < 1e-6);

    // Taps outside the prompt do nothing.
    assert_eq!(table.tap(Point::new(0, 0)).kind(), PhaseKind::RoundEndPrompt);

    let prompt = table.machine.layout().play_again().center();
    let snap = table.tap(prompt);
    assert!(!snap.active);
    assert_eq!(snap.kind(), PhaseKind::Idle);
    assert_eq!(snap.piles, PileSet::standard());
    assert_eq!(table.scene.current(), Scene::Tutorial);

    // Inactive until the tutorial enters it again.
    let snap = table.tick();
    assert!(!snap.active);
    table.machine.enter(TurnOwner::Human);
    assert!(table.machine.is_active());
}

#[test]
fn test_computer_taking_last_token_loses() {
    let mut table = Table::new([0, 0, 0, 1], TurnOwner::Computer);
    let mut snap = table.tick();
    while snap.winner().is_none() {
        snap = table.tick();
    }
    assert_eq!(snap.caption(), Some("YOU WIN!!!"));
}

#[test]
fn test_long_frame_is_capped() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    table.tap_token(3, 1);
    table.tap_accept();

    // Eight ticks at most: four of removal, four of shift.
    let snap = table.frame(FrameInput::hover(Point::new(0, 0), Duration::from_secs(10)));
    assert_eq!(snap.kind(), PhaseKind::Shifting);
    assert!(snap.shift_offset.abs() < 1e-6);
    assert_eq!(snap.piles, PileSet::standard());
}

#[test]
fn test_durations_follow_wall_clock() {
    let mut table = Table::new([1, 3, 5, 7], TurnOwner::Human);
    table.tap_token(3, 1);
    table.tap_accept();

    // Rendering twice as fast needs twice as many frames.
    let half = FrameInput::hover(Point::new(0, 0), TICK / 2);
    for _ in 0..7 {
        assert_eq!(table.frame(half).kind(), PhaseKind::Removing);
    }
    assert_eq!(table.frame(half).kind(), PhaseKind::Shifting);
}
