//! Move-choosing players that stand in for the human.

use crate::action::Move;
use crate::engine::NimEngine;
use crate::piles::PileSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Something that can pick a legal move for a non-empty pile set.
pub trait Strategy {
    /// Chooses a move. Callers only ask while tokens remain.
    fn choose(&mut self, piles: &PileSet) -> Move;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}

/// Plays the engine's move.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalStrategy;

impl Strategy for OptimalStrategy {
    fn choose(&mut self, piles: &PileSet) -> Move {
        NimEngine::compute_optimal_move(piles)
    }

    fn name(&self) -> &str {
        "optimal"
    }
}

/// Picks uniformly among all legal moves.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a reproducible random player.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose(&mut self, piles: &PileSet) -> Move {
        let moves = piles.legal_moves();
        let mv = *moves
            .choose(&mut self.rng)
            .unwrap_or_else(|| panic!("no legal move on {}", piles));
        debug!(%mv, "Random strategy chose");
        mv
    }

    fn name(&self) -> &str {
        "random"
    }
}
