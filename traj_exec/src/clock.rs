//! # Clock module
//!
//! The time source used by the controllers for dead reckoning, and the fixed-rate pacing which
//! is the only point at which a controller loop suspends.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Time source and pacing primitive for the controller loops.
pub trait Clock {
    /// Current time in seconds since an arbitrary fixed epoch.
    fn now_s(&self) -> f64;

    /// Block until the next tick of a loop running at `rate_hz`.
    fn sleep_until_next_tick(&self, rate_hz: f64);

    /// Give up the rest of the time slice, for loops which run as fast as the scheduler
    /// allows.
    fn yield_now(&self);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A clock backed by the operating system's monotonic clock.
pub struct SystemClock {
    epoch: Instant,

    /// The instant the last tick was scheduled for.
    last_tick: Mutex<Option<Instant>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            last_tick: Mutex::new(None),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_s(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn sleep_until_next_tick(&self, rate_hz: f64) {
        let period = Duration::from_secs_f64(1.0 / rate_hz);

        let mut last_tick = match self.last_tick.lock() {
            Ok(l) => l,
            Err(poisoned) => poisoned.into_inner(),
        };

        let now = Instant::now();

        // A deadline more than a whole period in the past means this is the first tick of a
        // new loop rather than an overrun of the current one.
        let deadline = match *last_tick {
            Some(t) if now.saturating_duration_since(t) < period * 2 => t + period,
            _ => now + period,
        };

        match deadline.checked_duration_since(now) {
            Some(d) => {
                *last_tick = Some(deadline);
                thread::sleep(d);
            }
            None => {
                debug!(
                    "Tick overran by {:.06} s",
                    now.saturating_duration_since(deadline).as_secs_f64()
                );
                *last_tick = Some(now);
            }
        }
    }

    fn yield_now(&self) {
        thread::yield_now();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paced_loop() {
        let clock = SystemClock::new();
        let t0 = clock.now_s();

        for _ in 0..10 {
            clock.sleep_until_next_tick(100.0);
        }

        let elapsed = clock.now_s() - t0;

        // Ten ticks at 100 Hz, allowing for a slow scheduler
        assert!(elapsed >= 0.095, "elapsed {}", elapsed);
        assert!(elapsed < 0.5, "elapsed {}", elapsed);
    }

    #[test]
    fn test_new_loop_after_gap() {
        let clock = SystemClock::new();
        clock.sleep_until_next_tick(1000.0);

        thread::sleep(Duration::from_millis(20));

        // The gap must not be treated as an overrun, so a full period is waited
        let t0 = clock.now_s();
        clock.sleep_until_next_tick(200.0);
        assert!(clock.now_s() - t0 >= 0.004);
    }
}
