//! Clock sources for the engine.
//!
//! Every time-dependent operation (borrowing, returning, fines, overdue
//! reports) reads the current instant from a [`Clock`]. Production code uses
//! [`SystemClock`]; tests use [`ManualClock`] so results do not depend on
//! when the test happens to run.

use crate::Timestamp;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// A source of the current instant.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and give another to the engine.
#[derive(Debug, Clone)]
pub struct ManualClock {
    /// Milliseconds since the Unix epoch
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    /// Create a clock stopped at the given instant.
    pub fn new(start: Timestamp) -> Self {
        Self::at_millis(start.timestamp_millis())
    }

    /// Create a clock stopped at the given number of milliseconds since epoch.
    pub fn at_millis(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, instant: Timestamp) {
        self.millis
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at_millis(0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_where_told() {
        let clock = ManualClock::at_millis(1_000);
        assert_eq!(clock.now().timestamp_millis(), 1_000);
    }

    #[test]
    fn advance_moves_forward() {
        let clock = ManualClock::at_millis(0);
        clock.advance(Duration::days(2));
        assert_eq!(clock.now().timestamp_millis(), 2 * 86_400_000);
    }

    #[test]
    fn clones_share_time() {
        let clock = ManualClock::at_millis(0);
        let handle = clock.clone();
        handle.advance(Duration::hours(5));
        assert_eq!(clock.now(), handle.now());
        assert_eq!(clock.now().timestamp_millis(), 5 * 3_600_000);
    }

    #[test]
    fn set_replaces_instant() {
        let clock = ManualClock::default();
        let target = DateTime::from_timestamp_millis(1_706_745_600_000).unwrap();
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn system_clock_is_monotone_enough() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn manual_clock_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ManualClock>();
    }
}
