//! The four rows of crystals.

use crate::action::Move;
use crate::{DEFAULT_PILES, MAX_TOKENS_PER_ROW, ROWS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Token counts of the four rows plus their cached running total.
///
/// The total always equals the sum of the rows. Rows only shrink during a
/// game; a fresh set is built at every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileSet {
    piles: [u8; ROWS],
    total: u32,
}

impl PileSet {
    /// The fixed `{1, 3, 5, 7}` opening.
    #[instrument]
    pub fn standard() -> Self {
        Self::from_counts(DEFAULT_PILES)
    }

    /// Draws every row independently in `1..=7`.
    #[instrument(skip(rng))]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut piles = [0u8; ROWS];
        for pile in &mut piles {
            *pile = rng.random_range(1..=MAX_TOKENS_PER_ROW);
        }
        debug!(?piles, "Rolled random piles");
        Self::from_counts(piles)
    }

    /// Builds a pile set from explicit counts.
    ///
    /// # Panics
    ///
    /// Panics if a row holds more than [`MAX_TOKENS_PER_ROW`] tokens.
    pub fn from_counts(piles: [u8; ROWS]) -> Self {
        assert!(
            piles.iter().all(|&p| p <= MAX_TOKENS_PER_ROW),
            "row exceeds {} tokens: {:?}",
            MAX_TOKENS_PER_ROW,
            piles
        );
        let total = piles.iter().map(|&p| u32::from(p)).sum();
        Self { piles, total }
    }

    /// Token count of `row`.
    pub fn count(&self, row: usize) -> u8 {
        self.piles[row]
    }

    /// All row counts in order.
    pub fn counts(&self) -> &[u8; ROWS] {
        &self.piles
    }

    /// Running total of tokens on the table.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// True once every token has been taken.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Bitwise XOR of all row counts.
    pub fn nim_sum(&self) -> u8 {
        self.piles.iter().fold(0, |acc, &p| acc ^ p)
    }

    /// Number of rows holding more than one token.
    pub fn multi(&self) -> usize {
        self.piles.iter().filter(|&&p| p > 1).count()
    }

    /// Lowest-indexed row that still has tokens.
    pub fn first_nonempty(&self) -> Option<usize> {
        self.piles.iter().position(|&p| p > 0)
    }

    /// Removes `mv.count()` tokens from `mv.row()`.
    ///
    /// # Panics
    ///
    /// Panics if the move is illegal for this set; callers guard every
    /// removal, so a failure here is a programming error.
    #[instrument(skip(self), fields(row = mv.row(), count = mv.count(), total = self.total))]
    pub fn remove(&mut self, mv: Move) {
        if let Err(e) = mv.check(self) {
            panic!("illegal removal {}: {}", mv, e);
        }
        self.piles[mv.row()] -= mv.count();
        self.total -= u32::from(mv.count());
        debug!(piles = ?self.piles, total = self.total, "Tokens removed");
    }

    /// Every legal move, row by row, smallest count first.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.piles
            .iter()
            .enumerate()
            .flat_map(|(row, &count)| (1..=count).map(move |n| Move::new(row, n)))
            .collect()
    }
}

impl Default for PileSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Display for PileSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self.piles.iter().map(|p| p.to_string()).collect();
        write!(f, "{{{}}}", rows.join(", "))
    }
}
