//! Drives the human side of the table with synthetic pointer input.
//!
//! The autopilot never touches game state. It reads the snapshot the
//! controller produced last frame and taps where a person would: a token,
//! then the accept button, then optionally the play-again prompt.

use crate::layout::{Layout, Point, RegionKind, SelectionMapper};
use crate::machine::{FrameInput, Phase, Snapshot};
use crate::strategy::Strategy;
use crate::turn::TurnOwner;
use std::time::Duration;
use tracing::{debug, instrument};

/// Turns a [`Strategy`]'s choices into per-frame [`FrameInput`]s.
#[derive(Debug, Clone)]
pub struct Autopilot<S> {
    strategy: S,
    frame: Duration,
    replay: bool,
}

impl<S: Strategy> Autopilot<S> {
    /// Creates an autopilot reporting `frame` of elapsed time per frame.
    pub fn new(strategy: S, frame: Duration) -> Self {
        Self {
            strategy,
            frame,
            replay: false,
        }
    }

    /// Also taps "play again" once a round has ended.
    pub fn replaying(mut self, replay: bool) -> Self {
        self.replay = replay;
        self
    }

    /// The wrapped strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Input for the next frame given the last snapshot.
    #[instrument(skip_all, fields(phase = %snapshot.kind(), strategy = self.strategy.name()))]
    pub fn next_input(&mut self, snapshot: &Snapshot, layout: &Layout) -> FrameInput {
        let rest = Point::new(0, 0);
        if !snapshot.active {
            return FrameInput::hover(rest, self.frame);
        }

        match (snapshot.phase, snapshot.turn) {
            (Phase::Idle, TurnOwner::Human) => {
                let mv = self.strategy.choose(&snapshot.piles);
                let mapper = SelectionMapper::new(layout, &snapshot.piles);
                let target = mapper.token_center(mv.row(), mv.last_col());
                debug!(%mv, ?target, "Autopilot taps token");
                FrameInput::tap(target, self.frame)
            }
            (Phase::Confirming { .. }, TurnOwner::Human) => {
                FrameInput::tap(layout.region(RegionKind::Accept).center(), self.frame)
            }
            (Phase::RoundEndPrompt { .. }, _) if self.replay => {
                FrameInput::tap(layout.region(RegionKind::PlayAgain).center(), self.frame)
            }
            _ => FrameInput::hover(rest, self.frame),
        }
    }
}
