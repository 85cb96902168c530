//! Crystal Nim core - pure game logic for human-vs-computer Nim.
//!
//! Four rows of crystals; on each turn a player removes a contiguous prefix
//! of one row. Whoever removes the last crystal loses.
//!
//! # Architecture
//!
//! - **Engine**: [`NimEngine`] picks the computer's move from binary nim-sum
//!   arithmetic and evaluates who is winning.
//! - **Layout**: [`SelectionMapper`] turns pointer coordinates into token
//!   selections and tests the fixed button regions.
//! - **Machine**: [`TurnStateMachine`] sequences selection, confirmation,
//!   removal and shifting animations, turn alternation and the round-end
//!   prompt, one [`TurnStateMachine::advance`] per rendered frame.
//!
//! # Example
//!
//! ```
//! use crystal_nim_core::{NimEngine, PileSet};
//!
//! let piles = PileSet::from_counts([0, 0, 1, 5]);
//! let mv = NimEngine::compute_optimal_move(&piles);
//! assert_eq!((mv.row(), mv.count()), (3, 5));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod autopilot;
mod clock;
mod engine;
mod invariants;
mod layout;
mod machine;
mod piles;
mod scene;
mod settings;
mod strategy;
mod turn;

// Crate-level exports - Rules
pub use action::{Move, MoveError};
pub use engine::{NimEngine, Outlook};
pub use piles::PileSet;
pub use turn::TurnOwner;

// Crate-level exports - Invariants and contracts
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, PileSetInvariants, PilesWithinBounds,
    RemovalContract, TotalMatchesPiles, assert_invariants,
};

// Crate-level exports - Geometry and hit-testing
pub use layout::{Layout, Point, Region, RegionKind, SelectionMapper, TokenHit};

// Crate-level exports - Timing
pub use clock::{AnimationClock, FrameClock, Timing};

// Crate-level exports - State machine
pub use machine::{FrameInput, Phase, PhaseKind, Snapshot, TurnStateMachine};
pub use scene::{Scene, SceneSwitch};
pub use settings::GameSettings;

// Crate-level exports - Players
pub use autopilot::Autopilot;
pub use strategy::{OptimalStrategy, RandomStrategy, Strategy};

/// Number of rows (piles) on the table.
pub const ROWS: usize = 4;

/// Largest number of crystals a single row can hold.
pub const MAX_TOKENS_PER_ROW: u8 = 7;

/// Starting configuration when piles are not randomized.
pub const DEFAULT_PILES: [u8; ROWS] = [1, 3, 5, 7];

/// Nominal frame rate every tick budget is derived from.
pub const NOMINAL_FRAME_RATE: u32 = 60;
