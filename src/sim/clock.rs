//! Monotonic time source for duration-gated behavior
//!
//! Power-up lifetime, spawn cooldown and control inversion all compare
//! timestamps taken from a `Clock`. Timestamps are offsets from the clock's
//! own epoch, so a fake clock can start at zero.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonic timestamps
pub trait Clock {
    /// Time elapsed since this clock's epoch
    fn now(&self) -> Duration;
}

/// Wall-clock implementation backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Manually advanced clock for tests and fixed-step headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start: Duration) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
