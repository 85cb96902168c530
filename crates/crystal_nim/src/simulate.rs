//! Headless games through the real turn controller.
//!
//! A seeded random player stands in for the human and taps tokens, the
//! accept button and the play-again prompt through an [`Autopilot`], so
//! every game exercises the same code paths as the terminal UI.

use anyhow::{Result, bail};
use crystal_nim_core::{
    Autopilot, GameSettings, Layout, RandomStrategy, Scene, SceneSwitch, Snapshot, Timing,
    TurnOwner, TurnStateMachine,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Frames after which a round is considered stuck.
const MAX_FRAMES_PER_ROUND: u32 = 100_000;

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Zero-based game number.
    pub game: u32,
    /// Rows at the start of the round.
    pub starting_piles: [u8; 4],
    /// Who moved first.
    pub first: TurnOwner,
    /// Who did not take the last crystal.
    pub winner: TurnOwner,
    /// Moves applied in the round.
    pub turns: u32,
    /// Frames the round took.
    pub frames: u32,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SimulationReport {
    /// Rounds the computer won.
    pub computer_wins: u32,
    /// Rounds the stand-in player won.
    pub player_wins: u32,
    /// Per-game details.
    pub games: Vec<GameRecord>,
}

impl SimulationReport {
    fn record(&mut self, record: GameRecord) {
        match record.winner {
            TurnOwner::Computer => self.computer_wins += 1,
            TurnOwner::Human => self.player_wins += 1,
        }
        self.games.push(record);
    }

    /// Human-readable summary, one line per game.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for g in &self.games {
            out.push_str(&format!(
                "game {:>4}: {:?} first={} winner={} turns={} frames={}\n",
                g.game, g.starting_piles, g.first, g.winner, g.turns, g.frames
            ));
        }
        out.push_str(&format!(
            "computer wins: {}, player wins: {}\n",
            self.computer_wins, self.player_wins
        ));
        out
    }
}

/// Plays `games` rounds and collects the results.
///
/// Rounds alternate who moves first unless `computer_first` is set.
#[instrument(skip(timing, settings))]
pub fn run(
    timing: Timing,
    settings: GameSettings,
    games: u32,
    seed: u64,
    computer_first: bool,
) -> Result<SimulationReport> {
    let layout = Layout::default();
    let mut machine = TurnStateMachine::with_seed(timing, layout, &settings, seed);
    let mut pilot = Autopilot::new(RandomStrategy::seeded(seed), timing.tick_length()).replaying(true);
    let mut scene = SceneSwitch::new();
    let mut report = SimulationReport::default();

    for game in 0..games {
        let first = if computer_first || game % 2 == 1 {
            TurnOwner::Computer
        } else {
            TurnOwner::Human
        };

        let starting_piles = *machine.piles().counts();
        scene.set(Scene::InGame);
        machine.enter(first);

        let mut snapshot = machine.snapshot();
        let mut frames = 0;
        let mut turns = 0;
        while machine.is_active() {
            let input = pilot.next_input(&snapshot, machine.layout());
            let next = machine.advance(&input, &mut scene, &settings);
            if next.piles.total() < snapshot.piles.total() && next.active {
                turns += 1;
            }
            if next.winner().is_some() && snapshot.winner().is_none() {
                debug!(game, winner = ?next.winner(), "Round decided");
            }
            snapshot = winner_or(next, snapshot);
            frames += 1;
            if frames > MAX_FRAMES_PER_ROUND {
                bail!("game {} did not finish after {} frames", game, frames);
            }
        }

        let Some(winner) = snapshot.winner() else {
            bail!("game {} ended without a winner", game);
        };
        report.record(GameRecord {
            game,
            starting_piles,
            first,
            winner,
            turns,
            frames,
        });
    }

    info!(
        computer_wins = report.computer_wins,
        player_wins = report.player_wins,
        "Simulation finished"
    );
    Ok(report)
}

/// Keeps the last round-end snapshot once "play again" resets the table.
fn winner_or(next: Snapshot, previous: Snapshot) -> Snapshot {
    if !next.active && previous.winner().is_some() {
        previous
    } else {
        next
    }
}
