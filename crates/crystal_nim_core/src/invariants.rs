//! First-class invariants and the removal contract.
//!
//! Invariants are properties every pile set must satisfy; the removal
//! contract relates a pile set before and after one move. Both are checked
//! after every removal in debug builds and can be tested on their own.

use crate::action::{Move, MoveError};
use crate::piles::PileSet;
use crate::{MAX_TOKENS_PER_ROW, ROWS};
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invariant violated: {}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the cached total equals the sum of the rows.
pub struct TotalMatchesPiles;

impl Invariant<PileSet> for TotalMatchesPiles {
    fn holds(piles: &PileSet) -> bool {
        let sum: u32 = piles.counts().iter().map(|&p| u32::from(p)).sum();
        piles.total() == sum
    }

    fn description() -> &'static str {
        "Running total equals the sum of all rows"
    }
}

/// Invariant: no row exceeds the structural limit.
pub struct PilesWithinBounds;

impl Invariant<PileSet> for PilesWithinBounds {
    fn holds(piles: &PileSet) -> bool {
        piles.counts().len() == ROWS && piles.counts().iter().all(|&p| p <= MAX_TOKENS_PER_ROW)
    }

    fn description() -> &'static str {
        "Every row holds at most seven tokens"
    }
}

/// All pile-set invariants as a composable set.
pub type PileSetInvariants = (TotalMatchesPiles, PilesWithinBounds);

/// Panics if any pile-set invariant is violated.
#[instrument(skip_all)]
pub fn assert_invariants(piles: &PileSet) {
    if let Err(violations) = PileSetInvariants::check_all(piles) {
        for v in &violations {
            warn!(violation = %v, piles = %piles, "Pile invariant violated");
        }
        panic!("pile invariants violated: {:?}", violations);
    }
}

/// Pre- and postconditions of a single removal.
pub struct RemovalContract;

impl RemovalContract {
    /// The move must be legal for the pile set it is applied to.
    pub fn pre(piles: &PileSet, mv: &Move) -> Result<(), MoveError> {
        mv.check(piles)
    }

    /// Exactly `count` tokens left the chosen row; every other row and the
    /// total changed accordingly.
    pub fn post(before: &PileSet, after: &PileSet, mv: &Move) -> Result<(), InvariantViolation> {
        for row in 0..ROWS {
            let expected = if row == mv.row() {
                before.count(row).checked_sub(mv.count())
            } else {
                Some(before.count(row))
            };
            if expected != Some(after.count(row)) {
                return Err(InvariantViolation::new(format!(
                    "row {} went from {} to {} after {}",
                    row,
                    before.count(row),
                    after.count(row),
                    mv
                )));
            }
        }

        if before.total() != after.total() + u32::from(mv.count()) {
            return Err(InvariantViolation::new(format!(
                "total went from {} to {} after {}",
                before.total(),
                after.total(),
                mv
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariants_hold_for_fresh_piles() {
        assert!(PileSetInvariants::check_all(&PileSet::standard()).is_ok());
        assert!(PileSetInvariants::check_all(&PileSet::from_counts([0, 0, 0, 0])).is_ok());
    }

    #[test]
    fn test_removal_contract_accepts_real_removal() {
        let before = PileSet::standard();
        let mv = Move::new(2, 3);
        assert!(RemovalContract::pre(&before, &mv).is_ok());
        let mut after = before;
        after.remove(mv);
        assert!(RemovalContract::post(&before, &after, &mv).is_ok());
        assert_invariants(&after);
    }

    #[test]
    fn test_removal_contract_detects_wrong_row() {
        let before = PileSet::standard();
        let mut after = before;
        after.remove(Move::new(1, 1));
        let claimed = Move::new(2, 1);
        assert!(RemovalContract::post(&before, &after, &claimed).is_err());
    }

    #[test]
    fn test_removal_contract_rejects_oversized_move() {
        let piles = PileSet::from_counts([1, 0, 0, 0]);
        assert!(RemovalContract::pre(&piles, &Move::new(0, 2)).is_err());
    }
}
