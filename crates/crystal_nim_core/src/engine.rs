//! Optimal move selection and win evaluation for misère Nim.
//!
//! The computer plays from nim-sum arithmetic. While at least two rows hold
//! more than one token, the winning move is the one that leaves a nim-sum of
//! zero. Once at most one such row remains the parity of the single-token
//! rows decides, so the endgame is special-cased: the computer leaves an odd
//! number of single-token rows and nothing bigger.

use crate::action::Move;
use crate::piles::PileSet;
use crate::turn::TurnOwner;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Prospects of the player about to move, assuming best play on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Outlook {
    /// The mover can force a win.
    Winning,
    /// Every move loses against best play.
    Losing,
}

/// Stateless Nim rules engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NimEngine;

impl NimEngine {
    /// Picks the computer's move.
    ///
    /// Deterministic: identical piles always give the identical move.
    ///
    /// # Panics
    ///
    /// Panics when called on an empty table; the turn controller never asks
    /// for a move once the last token is gone.
    #[instrument(skip_all, fields(piles = %piles))]
    pub fn compute_optimal_move(piles: &PileSet) -> Move {
        assert!(!piles.is_empty(), "no move exists on an empty table");

        let nim_sum = piles.nim_sum();
        let multi = piles.multi();

        if nim_sum == 0 || multi == 0 {
            // No move restores the winning invariant; take a single token and
            // hope the player slips.
            let Some(row) = piles.first_nonempty() else {
                unreachable!("non-empty table has a non-empty row");
            };
            debug!(row, nim_sum, multi, "Losing position, taking one token");
            return Move::new(row, 1);
        }

        let Some(row) = (0..crate::ROWS).find(|&i| piles.count(i) ^ nim_sum < piles.count(i)) else {
            unreachable!("non-zero nim-sum always has a reducible row");
        };
        let pile = piles.count(row);
        let target = pile ^ nim_sum;

        let mv = if multi > 1 {
            Move::new(row, pile - target)
        } else {
            // Only `row` holds more than one token. Leave the opponent an
            // odd number of single-token rows.
            let others = piles.total() - u32::from(pile);
            if others % 2 == 1 {
                Move::new(row, pile)
            } else {
                Move::new(row, pile - 1)
            }
        };

        debug!(row, nim_sum, multi, target, count = mv.count(), "Winning move chosen");
        mv
    }

    /// Evaluates the position for the player about to move.
    #[instrument(skip_all, fields(piles = %piles))]
    pub fn outlook(piles: &PileSet) -> Outlook {
        let losing = if piles.multi() == 0 {
            // Only single tokens left: every move takes exactly one, so the
            // mover takes the last one iff the count is odd.
            piles.total() % 2 == 1
        } else {
            piles.nim_sum() == 0
        };

        if losing {
            Outlook::Losing
        } else {
            Outlook::Winning
        }
    }

    /// Winner once the table is empty.
    ///
    /// Whoever removed the last token loses, so the winner is the opponent
    /// of `last_mover`. Returns `None` while tokens remain.
    #[instrument]
    pub fn winner(piles: &PileSet, last_mover: TurnOwner) -> Option<TurnOwner> {
        piles.is_empty().then(|| last_mover.opponent())
    }
}
