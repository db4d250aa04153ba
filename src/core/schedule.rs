//! The six-field schedule aggregate and its shortcut factories.
//!
//! A [`Schedule`] holds one [`Mask`] per field, in cron order: second,
//! minute, hour, day of month, month, day of week. It renders to the
//! canonical expression text and parses back to an equal value, so serde
//! stores it as a plain string and it can sit directly in a configuration
//! file.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::clock::Clock;
use crate::core::error::ValidationError;
use crate::core::field::Field;
use crate::core::mask::Mask;
use crate::parser::{parse_schedule, ParseError};
use crate::search::{self, SearchError, Upcoming};

/// A parsed cron schedule: one mask per field.
///
/// Immutable once built. Obtain one from [`parse_schedule`], `str::parse`,
/// [`Schedule::new`], or a shortcut factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    second: Mask,
    minute: Mask,
    hour: Mask,
    day_of_month: Mask,
    month: Mask,
    day_of_week: Mask,
}

impl Schedule {
    /// Build a schedule from six masks, in field order.
    ///
    /// Each mask is validated against the field of the slot it fills; a
    /// mask built for another field or a structurally invalid mask is
    /// rejected.
    pub fn new(
        second: Mask,
        minute: Mask,
        hour: Mask,
        day_of_month: Mask,
        month: Mask,
        day_of_week: Mask,
    ) -> Result<Self, ValidationError> {
        second.validate(Field::Second)?;
        minute.validate(Field::Minute)?;
        hour.validate(Field::Hour)?;
        day_of_month.validate(Field::DayOfMonth)?;
        month.validate(Field::Month)?;
        day_of_week.validate(Field::DayOfWeek)?;

        Ok(Self {
            second,
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
        })
    }

    /// Midnight on January 1st: `0 0 0 1 1 *`.
    pub fn yearly() -> Self {
        Self {
            day_of_month: Mask::Single(Field::DayOfMonth, 1),
            month: Mask::Single(Field::Month, 1),
            ..Self::daily()
        }
    }

    /// Midnight on the first of every month: `0 0 0 1 * *`.
    pub fn monthly() -> Self {
        Self {
            day_of_month: Mask::Single(Field::DayOfMonth, 1),
            ..Self::daily()
        }
    }

    /// Midnight every Sunday: `0 0 0 * * 0`.
    pub fn weekly() -> Self {
        Self {
            day_of_week: Mask::Single(Field::DayOfWeek, 0),
            ..Self::daily()
        }
    }

    /// Midnight every day: `0 0 0 * * *`.
    pub fn daily() -> Self {
        Self {
            hour: Mask::Single(Field::Hour, 0),
            ..Self::hourly()
        }
    }

    /// The top of every hour: `0 0 * * * *`.
    pub fn hourly() -> Self {
        Self {
            second: Mask::Single(Field::Second, 0),
            minute: Mask::Single(Field::Minute, 0),
            ..Self::default()
        }
    }

    /// A schedule pinned to the clock's current instant.
    ///
    /// Second, minute, hour, day of month, and month are captured as
    /// single values; day of week stays unconstrained. Backs the `@now`
    /// and `@reboot` tokens.
    pub fn now<C: Clock>(clock: &C) -> Self {
        let t = clock.now();
        Self {
            second: Mask::Single(Field::Second, t.second()),
            minute: Mask::Single(Field::Minute, t.minute()),
            hour: Mask::Single(Field::Hour, t.hour()),
            day_of_month: Mask::Single(Field::DayOfMonth, t.day()),
            month: Mask::Single(Field::Month, t.month()),
            day_of_week: Mask::all(Field::DayOfWeek),
        }
    }

    /// The mask for the second field.
    pub fn second(&self) -> &Mask {
        &self.second
    }

    /// The mask for the minute field.
    pub fn minute(&self) -> &Mask {
        &self.minute
    }

    /// The mask for the hour field.
    pub fn hour(&self) -> &Mask {
        &self.hour
    }

    /// The mask for the day-of-month field.
    pub fn day_of_month(&self) -> &Mask {
        &self.day_of_month
    }

    /// The mask for the month field.
    pub fn month(&self) -> &Mask {
        &self.month
    }

    /// The mask for the day-of-week field.
    pub fn day_of_week(&self) -> &Mask {
        &self.day_of_week
    }

    /// The earliest matching instant at or after `start`.
    ///
    /// See [`search::next_time`].
    pub fn next_after(&self, start: NaiveDateTime) -> Result<NaiveDateTime, SearchError> {
        search::next_time(self, start)
    }

    /// The next `count` matching instants at or after `start`.
    ///
    /// See [`search::next_times`].
    pub fn next_n_after(
        &self,
        start: NaiveDateTime,
        count: usize,
    ) -> Result<Vec<NaiveDateTime>, SearchError> {
        search::next_times(self, start, count)
    }

    /// Lazy iterator over successive matching instants from `start`.
    ///
    /// See [`search::upcoming`].
    pub fn upcoming(&self, start: NaiveDateTime) -> Upcoming<'_> {
        search::upcoming(self, start)
    }
}

/// Every field unconstrained: `* * * * * *`.
impl Default for Schedule {
    fn default() -> Self {
        Self {
            second: Mask::all(Field::Second),
            minute: Mask::all(Field::Minute),
            hour: Mask::all(Field::Hour),
            day_of_month: Mask::all(Field::DayOfMonth),
            month: Mask::all(Field::Month),
            day_of_week: Mask::all(Field::DayOfWeek),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.second, self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }
}

impl FromStr for Schedule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_schedule(s)
    }
}

impl Serialize for Schedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
