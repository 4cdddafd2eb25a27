//! Time source abstraction for the control loop.
//!
//! The loop never reads `Instant::now()` directly; it goes through
//! [`Clock`] so tests can drive the tick cycle with a virtual clock
//! instead of real sleeps.

use std::time::{Duration, Instant};

/// Monotonic time source with a cooperative sleep.
pub trait Clock {
    /// Monotonic time since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Suspend until roughly `duration` has passed.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
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
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
