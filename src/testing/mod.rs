//! Testing utilities for users of the library.
//!
//! [`FixedClock`] pins "now", so schedules built from the current
//! instant (`@now`, `@reboot`, [`Schedule::now`](crate::Schedule::now))
//! stay deterministic under test.

use chrono::NaiveDateTime;

use crate::clock::Clock;

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
