//! Frame pacing
//!
//! The loop polls as fast as it likes; the pacer says when enough time has
//! passed for the next simulation tick.

use std::time::Duration;

/// Gate that opens once per `interval`
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last_tick: Duration,
    /// Gap between the two most recent ticks
    last_gap: Option<Duration>,
}

impl FramePacer {
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self {
            interval,
            last_tick: now,
            last_gap: None,
        }
    }

    /// True (and the pacer re-arms) when at least one interval has elapsed
    /// since the last tick.
    pub fn should_tick(&mut self, now: Duration) -> bool {
        let elapsed = now.saturating_sub(self.last_tick);
        if elapsed < self.interval {
            return false;
        }
        self.last_gap = Some(elapsed);
        self.last_tick = now;
        true
    }

    /// Time left until the next tick is due
    pub fn until_next(&self, now: Duration) -> Duration {
        (self.last_tick + self.interval).saturating_sub(now)
    }

    /// Instantaneous tick rate from the last gap
    pub fn fps(&self) -> Option<f64> {
        self.last_gap
            .filter(|gap| !gap.is_zero())
            .map(|gap| 1.0 / gap.as_secs_f64())
    }
}
