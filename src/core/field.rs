//! The six schedule fields and their value domains.
//!
//! Each field carries an inclusive numeric range and, for months and
//! weekdays, a table of three-letter uppercase names.

use std::fmt;
use std::ops::RangeInclusive;

/// Month names accepted wherever the month field expects a constant.
const MONTH_NAMES: [(&str, u32); 12] = [
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

/// Weekday names accepted wherever the day-of-week field expects a
/// constant. Sunday is 0.
const DAY_OF_WEEK_NAMES: [(&str, u32); 7] = [
    ("SUN", 0),
    ("MON", 1),
    ("TUE", 2),
    ("WED", 3),
    ("THR", 4),
    ("FRI", 5),
    ("SAT", 6),
];

/// A position in a cron expression, in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Second,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl Field {
    /// The inclusive range of legal values for this field.
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Field::Second | Field::Minute => 0..=59,
            Field::Hour => 0..=23,
            Field::DayOfMonth => 1..=31,
            Field::Month => 1..=12,
            Field::DayOfWeek => 0..=6,
        }
    }

    /// Smallest legal value for this field.
    pub fn min(self) -> u32 {
        *self.range().start()
    }

    /// Largest legal value for this field.
    pub fn max(self) -> u32 {
        *self.range().end()
    }

    /// Whether `value` lies inside the field's range.
    pub fn contains(self, value: u32) -> bool {
        self.range().contains(&value)
    }

    /// The symbolic names this field accepts, paired with their values.
    ///
    /// Empty for the purely numeric fields.
    pub fn names(self) -> &'static [(&'static str, u32)] {
        match self {
            Field::Month => &MONTH_NAMES,
            Field::DayOfWeek => &DAY_OF_WEEK_NAMES,
            _ => &[],
        }
    }

    /// Resolve a symbolic name like `JAN` or `TUE` for this field.
    pub fn value_of(self, name: &str) -> Option<u32> {
        self.names()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, v)| v)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Second => "second",
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "day of month",
            Field::Month => "month",
            Field::DayOfWeek => "day of week",
        };
        write!(f, "{}", name)
    }
}
