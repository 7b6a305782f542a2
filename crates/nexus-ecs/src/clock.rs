//! Frame timing

use std::time::{Duration, Instant};

/// Monotonic delta timer for frame loops.
///
/// Each [`tick`](Self::tick) returns the time elapsed since the previous
/// tick (or since construction/reset for the first one).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    /// Clock whose first tick measures from now.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous tick; advances the clock.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;
        delta
    }

    /// Restart measurement from now without reporting a delta.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
