//! Periodic ticker and clocks
//!
//! Slow game logic (spawn countdowns, banners, ending stages) runs on a fixed
//! wall-clock cadence, independent of the render rate.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of wall-clock milliseconds
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Monotonic clock measured from its creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Manually advanced clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Fires at most once per period
///
/// Each firing advances the reference point by exactly one period, so a
/// caller that falls behind catches up one firing per poll instead of losing
/// periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTicker {
    last_fired_ms: u64,
    period_ms: u64,
}

impl PeriodicTicker {
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        debug_assert!(period_ms > 0, "ticker period must be positive");
        Self {
            last_fired_ms: now_ms,
            period_ms,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Restart the period from `now_ms`
    pub fn reset(&mut self, now_ms: u64) {
        self.last_fired_ms = now_ms;
    }

    pub fn is_ready(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_fired_ms) >= self.period_ms {
            self.last_fired_ms += self.period_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_not_ready_before_period() {
        let mut ticker = PeriodicTicker::new(50, 1000);
        assert!(!ticker.is_ready(1000));
        assert!(!ticker.is_ready(1049));
        assert!(ticker.is_ready(1050));
        assert!(!ticker.is_ready(1050));
    }

    #[test]
    fn test_catches_up_one_period_per_poll() {
        let mut ticker = PeriodicTicker::new(50, 0);
        // Three periods late: fires three polls in a row, then stops
        assert!(ticker.is_ready(160));
        assert!(ticker.is_ready(160));
        assert!(ticker.is_ready(160));
        assert!(!ticker.is_ready(160));
        // Cadence stays anchored to multiples of the period
        assert!(ticker.is_ready(200));
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let view = clock.clone();
        clock.advance(75);
        assert_eq!(view.now_ms(), 75);
        view.set(10);
        assert_eq!(clock.now_ms(), 10);
    }

    proptest! {
        #[test]
        fn prop_fires_once_per_whole_period(period in 1u64..500, periods in 0u64..20, extra in 0u64..499) {
            let extra = extra % period;
            let mut ticker = PeriodicTicker::new(period, 0);
            let now = periods * period + extra;
            let mut fired = 0;
            while ticker.is_ready(now) {
                fired += 1;
            }
            prop_assert_eq!(fired, periods);
        }

        #[test]
        fn prop_steady_cadence(period in 1u64..200, steps in 1usize..50) {
            let mut ticker = PeriodicTicker::new(period, 0);
            for step in 1..=steps as u64 {
                prop_assert!(!ticker.is_ready(step * period - 1));
                prop_assert!(ticker.is_ready(step * period));
                prop_assert!(!ticker.is_ready(step * period));
            }
        }
    }
}
