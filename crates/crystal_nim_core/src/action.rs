//! First-class move type.
//!
//! A move is the intent to take `count` tokens from the left end of one
//! row. It can be checked against a pile set before it is applied.

use crate::ROWS;
use crate::piles::PileSet;
use serde::{Deserialize, Serialize};

/// Remove `count` tokens (columns `0..count`) from `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    row: usize,
    count: u8,
}

impl Move {
    /// Creates a move.
    pub fn new(row: usize, count: u8) -> Self {
        Self { row, count }
    }

    /// Prefix selection: tapping column `col` takes columns `0..=col`.
    pub fn from_selection(row: usize, col: u8) -> Self {
        Self::new(row, col + 1)
    }

    /// Row the tokens come from.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Number of tokens taken.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Rightmost column included in the selection.
    pub fn last_col(&self) -> u8 {
        self.count.saturating_sub(1)
    }

    /// Checks that the move is legal for `piles`.
    pub fn check(&self, piles: &PileSet) -> Result<(), MoveError> {
        if self.row >= ROWS {
            return Err(MoveError::NoSuchRow(self.row));
        }
        if self.count == 0 {
            return Err(MoveError::NothingTaken);
        }
        let available = piles.count(self.row);
        if self.count > available {
            return Err(MoveError::NotEnoughTokens {
                row: self.row,
                requested: self.count,
                available,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "take {} from row {}", self.count, self.row + 1)
    }
}

/// Why a move cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Row index past the last row.
    #[display("Row {} does not exist", _0)]
    NoSuchRow(usize),

    /// A move must take at least one token.
    #[display("A move must remove at least one token")]
    NothingTaken,

    /// The row is shorter than the requested count.
    #[display("Row {} holds {} tokens, cannot remove {}", row, available, requested)]
    NotEnoughTokens {
        /// Row index.
        row: usize,
        /// Tokens the move wants.
        requested: u8,
        /// Tokens the row holds.
        available: u8,
    },
}

impl std::error::Error for MoveError {}
