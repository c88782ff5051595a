//! Frame-time accumulator
//!
//! Turns irregular host frame callbacks into a whole number of fixed ticks.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_MS, TICK_MS};

/// Fixed-timestep stepper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stepper {
    /// Unspent wall time (ms)
    accumulator: f64,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `elapsed_ms` and return how many ticks to run now.
    ///
    /// Each call is clamped to `MAX_FRAME_MS` so a stalled tab cannot queue
    /// an unbounded catch-up. Negative or non-finite input counts as zero.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let elapsed = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= TICK_MS {
            self.accumulator -= TICK_MS;
            ticks += 1;
        }
        ticks
    }

    /// Leftover time as a fraction of a tick, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.accumulator / TICK_MS
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
