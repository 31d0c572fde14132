//! Deterministic `Clock` implementation for tests.

use chrono::{DateTime, TimeZone, Utc};
use novel_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixed_instant())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The instant used across tests: 2026-01-15T10:00:00Z.
///
/// # Panics
///
/// Never; the date is statically valid.
#[must_use]
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}
