//! Complete games played through the turn controller with an autopilot.

use std::time::Duration;

use crystal_nim_core::{
    Autopilot, GameSettings, Layout, NimEngine, OptimalStrategy, Outlook, PileSet, RandomStrategy,
    Scene, SceneSwitch, Strategy, Timing, TurnOwner, TurnStateMachine,
};

const FRAME: Duration = Duration::from_millis(100);

/// Plays one round to its end and returns the winner and frames used.
fn play_round<S: Strategy>(
    machine: &mut TurnStateMachine,
    pilot: &mut Autopilot<S>,
    settings: &GameSettings,
) -> (TurnOwner, u32) {
    let mut scene = SceneSwitch::new();
    scene.set(Scene::InGame);
    let mut snapshot = machine.snapshot();
    let mut frames = 0;

    loop {
        if let Some(winner) = snapshot.winner() {
            return (winner, frames);
        }
        let input = pilot.next_input(&snapshot, machine.layout());
        snapshot = machine.advance(&input, &mut scene, settings);
        frames += 1;
        assert!(frames < 5_000, "round did not finish: {:?}", snapshot);
    }
}

fn machine(settings: &GameSettings, seed: u64) -> TurnStateMachine {
    TurnStateMachine::with_seed(Timing::new(10, 5, 15), Layout::default(), settings, seed)
}

#[test]
fn test_random_human_games_terminate() {
    let settings = GameSettings {
        randomize_piles: true,
    };

    for seed in 0..25 {
        let mut m = machine(&settings, seed);
        let first = if seed % 2 == 0 {
            TurnOwner::Human
        } else {
            TurnOwner::Computer
        };
        m.enter(first);
        let mut pilot = Autopilot::new(RandomStrategy::seeded(seed), FRAME);
        let (_, frames) = play_round(&mut m, &mut pilot, &settings);
        assert!(m.piles().is_empty());
        assert!(frames > 0);
    }
}

#[test]
fn test_computer_converts_winning_start() {
    let settings = GameSettings::new();

    // The computer moves first from a position it can win.
    for (seed, counts) in [[2, 3, 5, 7], [0, 0, 0, 5], [1, 1, 0, 0], [0, 4, 4, 1]]
        .into_iter()
        .enumerate()
    {
        let piles = PileSet::from_counts(counts);
        assert_eq!(NimEngine::outlook(&piles), Outlook::Winning, "{piles}");

        let mut m = machine(&settings, seed as u64).with_piles(piles);
        m.enter(TurnOwner::Computer);
        let mut pilot = Autopilot::new(RandomStrategy::seeded(seed as u64), FRAME);
        let (winner, _) = play_round(&mut m, &mut pilot, &settings);
        assert_eq!(winner, TurnOwner::Computer, "lost from {piles}");
    }
}

#[test]
fn test_optimal_human_beats_computer_on_standard_opening() {
    // {1, 3, 5, 7} is lost for whoever moves first.
    let settings = GameSettings::new();
    let mut m = machine(&settings, 1);
    m.enter(TurnOwner::Computer);
    let mut pilot = Autopilot::new(OptimalStrategy, FRAME);
    let (winner, _) = play_round(&mut m, &mut pilot, &settings);
    assert_eq!(winner, TurnOwner::Human);
}

#[test]
fn test_play_again_starts_a_fresh_round() {
    let settings = GameSettings::new();
    let mut m = machine(&settings, 9);
    m.enter(TurnOwner::Human);
    let mut pilot = Autopilot::new(RandomStrategy::seeded(9), FRAME).replaying(true);
    play_round(&mut m, &mut pilot, &settings);

    let mut scene = SceneSwitch::new();
    scene.set(Scene::InGame);
    let mut frames = 0;
    while m.is_active() {
        let input = pilot.next_input(&m.snapshot(), m.layout());
        m.advance(&input, &mut scene, &settings);
        frames += 1;
        assert!(frames < 100, "prompt never tapped");
    }
    assert_eq!(scene.current(), Scene::Tutorial);
    assert_eq!(*m.piles(), PileSet::standard());

    m.enter(TurnOwner::Computer);
    let (winner, _) = play_round(&mut m, &mut pilot, &settings);
    assert!(matches!(winner, TurnOwner::Human | TurnOwner::Computer));
}
