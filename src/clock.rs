//! Wall-clock access behind an injectable seam.
//!
//! Schedules built from the current instant (`@now`, `@reboot`) capture
//! their field values through a [`Clock`], keeping time-dependent behavior
//! deterministic under test.

use chrono::{Local, NaiveDateTime};

/// Source of the current instant.
pub trait Clock {
    /// The current date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The system wall clock, in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
