use std::time::{Duration, Instant};

/// Default UI poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Source of monotonic time for timers
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A repeating timer driven by polling.
///
/// Fires at most once per `poll`; periods missed while nobody polled
/// collapse into that single firing.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Instant,
}

impl IntervalTimer {
    pub fn start(now: Instant, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true if a period has elapsed since the last firing
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        let following = self.next_due + self.period;
        self.next_due = if following > now {
            following
        } else {
            now + self.period
        };
        true
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    /// Clock that only moves when told to; clones share the same time
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<Instant>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Rc::new(Cell::new(Instant::now())),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }
}
