//! Tick budgets and animation counters.
//!
//! Durations are counted in nominal ticks. [`FrameClock`] turns the wall
//! time between rendered frames into whole ticks so animations last the same
//! wall time at any render rate; [`AnimationClock`] holds the counters and
//! interpolation scalars the phases step through.

use crate::NOMINAL_FRAME_RATE;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{instrument, trace};

/// Tick budgets derived from the nominal frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Timing {
    /// Nominal ticks per second.
    rate: u32,
    /// Ticks the computer's proposal stays on screen before it auto-accepts.
    computer_pause: u32,
    /// Upper bound on ticks simulated in a single frame.
    max_catch_up: u32,
}

impl Timing {
    /// Creates tick budgets for `rate` ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `rate < 2` (the half-second budgets would be empty) or
    /// `max_catch_up == 0`.
    pub fn new(rate: u32, computer_pause: u32, max_catch_up: u32) -> Self {
        assert!(rate >= 2, "frame rate must be at least 2, got {}", rate);
        assert!(max_catch_up > 0, "max_catch_up must be positive");
        Self {
            rate,
            computer_pause,
            max_catch_up,
        }
    }

    /// Converts a wall-clock pause into ticks at this rate.
    pub fn ticks_in(rate: u32, pause: Duration) -> u32 {
        let ticks = pause.as_millis() * u128::from(rate) / 1000;
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// Ticks for the removal fade and for the row shift: one second.
    pub fn full(&self) -> u32 {
        self.rate
    }

    /// Ticks for the caption fade-in and each half of the prompt pulse.
    pub fn half(&self) -> u32 {
        self.rate / 2
    }

    /// Wall time of one tick.
    pub fn tick_length(&self) -> Duration {
        Duration::from_secs(1) / self.rate
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(NOMINAL_FRAME_RATE, NOMINAL_FRAME_RATE, NOMINAL_FRAME_RATE / 4)
    }
}

/// Converts elapsed wall time into whole ticks, carrying the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct FrameClock {
    tick_length: Duration,
    max_catch_up: u32,
    carry: Duration,
}

impl FrameClock {
    /// Creates a clock for the given budgets.
    pub fn new(timing: &Timing) -> Self {
        Self {
            tick_length: timing.tick_length(),
            max_catch_up: timing.max_catch_up,
            carry: Duration::ZERO,
        }
    }

    /// Whole ticks covered by `elapsed` plus the carried remainder.
    ///
    /// At most `max_catch_up` ticks are returned; time beyond that is
    /// dropped so a stalled frame does not fast-forward the whole game.
    #[instrument(skip(self), level = "trace")]
    pub fn ticks_for(&mut self, elapsed: Duration) -> u32 {
        let mut available = self.carry + elapsed;
        let mut ticks = 0;
        while available >= self.tick_length && ticks < self.max_catch_up {
            available -= self.tick_length;
            ticks += 1;
        }
        self.carry = if ticks == self.max_catch_up {
            Duration::ZERO
        } else {
            available
        };
        trace!(ticks, carry = ?self.carry, "Frame ticks");
        ticks
    }

    /// Drops any carried remainder.
    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }
}

/// Phase counter plus presentation scalars.
///
/// `alpha` is the removal fade or the caption fade-in, `prompt_alpha` the
/// pulsing "play again" prompt, `shift_offset` the distance between the
/// first surviving token of the shifting row and the row origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct AnimationClock {
    counter: u32,
    alpha: f32,
    prompt_alpha: f32,
    fade_step: f32,
    shift_offset: f32,
    shift_step: f32,
}

impl AnimationClock {
    /// Clock at rest: everything opaque, nothing moving.
    pub fn new() -> Self {
        Self {
            counter: 0,
            alpha: 1.0,
            prompt_alpha: 0.0,
            fade_step: 0.0,
            shift_offset: 0.0,
            shift_step: 0.0,
        }
    }

    /// Restarts the phase counter.
    pub fn restart(&mut self) {
        self.counter = 0;
    }

    /// Advances the phase counter by one tick and returns it.
    pub fn tick(&mut self) -> u32 {
        self.counter += 1;
        self.counter
    }

    /// Starts the removal fade: fully opaque, `budget` ticks to go.
    pub fn begin_fade_out(&mut self, budget: u32) {
        self.counter = 0;
        self.alpha = 1.0;
        self.fade_step = 1.0 / budget as f32;
    }

    /// One step of the removal fade.
    pub fn fade_out(&mut self) {
        self.alpha = (self.alpha - self.fade_step).max(0.0);
    }

    /// Starts sliding a row left by `distance` units over `budget` ticks.
    ///
    /// With `already_done` the counter starts at the budget, so the next tick
    /// completes the shift without moving anything.
    pub fn begin_shift(&mut self, distance: f32, budget: u32, already_done: bool) {
        self.alpha = 1.0;
        self.counter = if already_done { budget } else { 0 };
        self.shift_offset = distance;
        self.shift_step = distance / budget as f32;
    }

    /// One step of the row shift.
    pub fn shift(&mut self) {
        self.shift_offset = (self.shift_offset - self.shift_step).max(0.0);
    }

    /// Starts the caption fade-in over `budget` ticks.
    pub fn begin_fade_in(&mut self, budget: u32) {
        self.counter = 0;
        self.alpha = 0.0;
        self.fade_step = 1.0 / budget as f32;
        self.shift_offset = 0.0;
        self.shift_step = 0.0;
    }

    /// One step of the caption fade-in.
    pub fn fade_in(&mut self) {
        self.alpha = (self.alpha + self.fade_step).min(1.0);
    }

    /// Caption fully visible; the prompt starts transparent and brightening.
    pub fn begin_pulse(&mut self) {
        self.counter = 0;
        self.alpha = 1.0;
        self.prompt_alpha = 0.0;
        self.fade_step = self.fade_step.abs();
    }

    /// One step of the prompt pulse; the direction flips every `half` ticks.
    pub fn pulse(&mut self, half: u32) {
        self.counter += 1;
        self.prompt_alpha = (self.prompt_alpha + self.fade_step).clamp(0.0, 1.0);
        if self.counter >= half {
            self.counter = 0;
            self.fade_step = -self.fade_step;
        }
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}
