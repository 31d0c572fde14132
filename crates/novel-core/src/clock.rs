//! Clock abstraction for determinism.

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Milliseconds elapsed between `started` and `clock.now()`.
///
/// A clock that moves backwards yields zero.
#[must_use]
pub fn elapsed_millis(clock: &dyn Clock, started: DateTime<Utc>) -> u64 {
    u64::try_from((clock.now() - started).num_milliseconds()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct At(DateTime<Utc>);

    impl Clock for At {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_elapsed_millis_measures_forward_time() {
        let started = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = At(started + chrono::Duration::milliseconds(250));

        assert_eq!(elapsed_millis(&clock, started), 250);
    }

    #[test]
    fn test_elapsed_millis_saturates_when_clock_goes_backwards() {
        let started = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = At(started - chrono::Duration::seconds(1));

        assert_eq!(elapsed_millis(&clock, started), 0);
    }
}
