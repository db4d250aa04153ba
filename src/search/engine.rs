//! Smallest-unit-first carry search for the next matching instant.
//!
//! Calendar slots are ordered second < minute < hour < day < month. The
//! search repeatedly scans them in that order: a slot whose current value
//! already matches is left alone; a slot with a larger qualifying value is
//! advanced to it, all smaller slots are reset to their minimums, and the
//! scan restarts; a slot with no qualifying value left carries into the
//! next larger unit. A full pass with no change is the answer.
//!
//! Day of month and day of week are the one asymmetry: when both are
//! constrained, a day qualifies under either mask (cron's OR rule), and
//! weekday masks are translated to concrete month days by scanning the
//! candidate month.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use thiserror::Error;
use tracing::{trace, warn};

use crate::core::mask::Mask;
use crate::core::schedule::Schedule;

/// Years past the start instant examined before the search gives up.
///
/// The Gregorian weekday and leap-year pattern repeats every 400 years,
/// so any satisfiable schedule matches within this window.
pub const SEARCH_HORIZON_YEARS: i32 = 400;

/// Errors raised by the search functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// `next_times` was asked for zero occurrences.
    #[error("occurrence count must be at least 1")]
    InvalidCount,

    /// No instant within [`SEARCH_HORIZON_YEARS`] of the start matches,
    /// e.g. a schedule pinned to February 30th.
    #[error("no matching time within {SEARCH_HORIZON_YEARS} years of the start")]
    NoMatchingTime,
}

/// Calendar slots in carry order. Day covers both day-bound fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Second,
    Minute,
    Hour,
    Day,
    Month,
}

const SLOTS: [Slot; 5] = [Slot::Second, Slot::Minute, Slot::Hour, Slot::Day, Slot::Month];

/// The earliest instant at or after `start` matching the schedule.
///
/// Sub-second components of `start` are truncated, so a start inside a
/// matching second resolves to that second.
pub fn next_time(schedule: &Schedule, start: NaiveDateTime) -> Result<NaiveDateTime, SearchError> {
    let start = truncate(start);
    let mut t = start;

    'scan: loop {
        if t.year() - start.year() > SEARCH_HORIZON_YEARS {
            warn!(schedule = %schedule, %start, "Search horizon exhausted without a matching time");
            return Err(SearchError::NoMatchingTime);
        }

        for slot in SLOTS {
            let current = slot_value(t, slot);
            let candidates = slot_candidates(schedule, t, slot);

            match candidates.into_iter().find(|&v| v >= current) {
                Some(next) if next == current => {}
                Some(next) => {
                    t = advance_to(t, slot, next, schedule);
                    trace!(?slot, value = next, time = %t, "Advanced slot");
                    continue 'scan;
                }
                None => {
                    t = carry(t, slot, schedule);
                    trace!(?slot, time = %t, "Carried into next unit");
                    continue 'scan;
                }
            }
        }

        return Ok(t);
    }
}

/// The next `count` matching instants at or after `start`, strictly
/// increasing; each successor is searched from one second past its
/// predecessor.
pub fn next_times(
    schedule: &Schedule,
    start: NaiveDateTime,
    count: usize,
) -> Result<Vec<NaiveDateTime>, SearchError> {
    if count == 0 {
        return Err(SearchError::InvalidCount);
    }

    let mut times = Vec::with_capacity(count);
    let mut from = start;
    while times.len() < count {
        let next = next_time(schedule, from)?;
        times.push(next);
        from = next + Duration::seconds(1);
    }
    Ok(times)
}

/// Lazy iterator over successive matching instants from `start`.
pub fn upcoming(schedule: &Schedule, start: NaiveDateTime) -> Upcoming<'_> {
    Upcoming {
        schedule,
        from: truncate(start),
    }
}

/// Iterator over the matching instants of a schedule.
///
/// Each element is computed on demand from one second past its
/// predecessor; nothing is precomputed. Restart by constructing a new
/// iterator from the original start. Ends only when the search horizon
/// is exhausted, which a satisfiable schedule never hits.
#[derive(Debug, Clone)]
pub struct Upcoming<'a> {
    schedule: &'a Schedule,
    from: NaiveDateTime,
}

impl Iterator for Upcoming<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let next = next_time(self.schedule, self.from).ok()?;
        self.from = next + Duration::seconds(1);
        Some(next)
    }
}

fn truncate(t: NaiveDateTime) -> NaiveDateTime {
    t.with_nanosecond(0).unwrap_or(t)
}

fn slot_value(t: NaiveDateTime, slot: Slot) -> u32 {
    match slot {
        Slot::Second => t.second(),
        Slot::Minute => t.minute(),
        Slot::Hour => t.hour(),
        Slot::Day => t.day(),
        Slot::Month => t.month(),
    }
}

/// The ascending qualifying values for a slot at the current instant.
///
/// Day candidates depend on the instant's month and are recomputed every
/// pass, so a month advance never leaves a stale day match behind.
fn slot_candidates(schedule: &Schedule, t: NaiveDateTime, slot: Slot) -> Vec<u32> {
    match slot {
        Slot::Second => schedule.second().values(),
        Slot::Minute => schedule.minute().values(),
        Slot::Hour => schedule.hour().values(),
        Slot::Day => day_candidates(schedule, t.year(), t.month()),
        Slot::Month => schedule.month().values(),
    }
}

/// The qualifying days of one calendar month under the OR rule.
///
/// Days past the month's end are dropped, so a day-of-month 31 simply
/// has no candidate in April rather than producing an invalid date.
fn day_candidates(schedule: &Schedule, year: i32, month: u32) -> Vec<u32> {
    let last = days_in_month(year, month);
    let by_month = || {
        schedule
            .day_of_month()
            .values()
            .into_iter()
            .filter(|&day| day <= last)
    };

    if matches!(schedule.day_of_week(), Mask::All(_)) {
        by_month().collect()
    } else if matches!(schedule.day_of_month(), Mask::All(_)) {
        weekdays_as_month_days(schedule.day_of_week(), year, month, last)
    } else {
        let mut days: Vec<u32> = by_month().collect();
        days.extend(weekdays_as_month_days(
            schedule.day_of_week(),
            year,
            month,
            last,
        ));
        days.sort_unstable();
        days.dedup();
        days
    }
}

/// Translate a weekday mask to the matching day numbers of one month.
fn weekdays_as_month_days(mask: &Mask, year: i32, month: u32, last: u32) -> Vec<u32> {
    (1..=last)
        .filter(|&day| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| mask.contains(date.weekday().num_days_from_sunday()))
                .unwrap_or(false)
        })
        .collect()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|end| end.day())
        .unwrap_or(28)
}

/// Overwrite one slot with a value already known to be in its domain.
fn set_slot(t: NaiveDateTime, slot: Slot, value: u32) -> NaiveDateTime {
    match slot {
        Slot::Second => t.with_second(value),
        Slot::Minute => t.with_minute(value),
        Slot::Hour => t.with_hour(value),
        Slot::Day => t.with_day(value),
        Slot::Month => t.with_month(value),
    }
    .unwrap_or(t)
}

/// Reset every slot strictly smaller than `limit` to its minimum.
///
/// The day slot resets to 1, not to its masks' minimum: the true minimum
/// under the OR rule depends on the month, and the restarted scan lifts
/// the day to it. Resetting the day first also keeps intermediate dates
/// valid when the month slot is about to change.
fn reset_below(t: NaiveDateTime, limit: Slot, schedule: &Schedule) -> NaiveDateTime {
    let mut t = t;
    for slot in SLOTS {
        if slot >= limit {
            break;
        }
        let value = match slot {
            Slot::Second => mask_min(schedule.second()),
            Slot::Minute => mask_min(schedule.minute()),
            Slot::Hour => mask_min(schedule.hour()),
            Slot::Day => 1,
            Slot::Month => mask_min(schedule.month()),
        };
        t = set_slot(t, slot, value);
    }
    t
}

/// Move a slot forward to `value`, resetting everything smaller.
fn advance_to(t: NaiveDateTime, slot: Slot, value: u32, schedule: &Schedule) -> NaiveDateTime {
    set_slot(reset_below(t, slot, schedule), slot, value)
}

/// No qualifying value left in `slot`: reset it and everything smaller,
/// then increment the next larger unit (month overflow rolls the year).
fn carry(t: NaiveDateTime, slot: Slot, schedule: &Schedule) -> NaiveDateTime {
    let t = reset_below(t, slot, schedule);
    match slot {
        Slot::Second => set_slot(t, Slot::Second, mask_min(schedule.second())) + Duration::minutes(1),
        Slot::Minute => set_slot(t, Slot::Minute, mask_min(schedule.minute())) + Duration::hours(1),
        Slot::Hour => set_slot(t, Slot::Hour, mask_min(schedule.hour())) + Duration::days(1),
        Slot::Day => {
            let t = set_slot(t, Slot::Day, 1);
            let (year, month) = if t.month() == 12 {
                (t.year() + 1, 1)
            } else {
                (t.year(), t.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, 1)
                .map(|date| date.and_time(t.time()))
                .unwrap_or(t)
        }
        Slot::Month => {
            // Day is already back at 1, so both sets are safe.
            let t = set_slot(t, Slot::Month, mask_min(schedule.month()));
            t.with_year(t.year() + 1).unwrap_or(t)
        }
    }
}

/// Smallest value a validated mask enumerates.
fn mask_min(mask: &Mask) -> u32 {
    mask.values()
        .first()
        .copied()
        .unwrap_or_else(|| mask.field().min())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schedule;
    use chrono::NaiveDate;

    fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2001, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 12), 31);
        assert_eq!(days_in_month(2000, 4), 30);
    }

    #[test]
    fn test_weekdays_translate_to_month_days() {
        // January 2000 opened on a Saturday.
        let sundays = Mask::single(crate::Field::DayOfWeek, 0).unwrap();
        assert_eq!(
            weekdays_as_month_days(&sundays, 2000, 1, 31),
            vec![2, 9, 16, 23, 30]
        );
    }

    #[test]
    fn test_day_candidates_or_both_masks() {
        let schedule = parse_schedule("* * * 15 * WED").unwrap();
        let days = day_candidates(&schedule, 2000, 1);
        assert_eq!(days, vec![5, 12, 15, 19, 26]);
    }

    #[test]
    fn test_day_candidates_drop_days_past_month_end() {
        let schedule = parse_schedule("* * * 31 * *").unwrap();
        assert_eq!(day_candidates(&schedule, 2000, 4), Vec::<u32>::new());
        assert_eq!(day_candidates(&schedule, 2000, 1), vec![31]);
    }

    #[test]
    fn test_matching_start_is_returned_unchanged() {
        let schedule = parse_schedule("* * * * * *").unwrap();
        let start = dt(2000, 1, 1, 12, 34, 56);
        assert_eq!(next_time(&schedule, start).unwrap(), start);
    }

    #[test]
    fn test_subsecond_start_truncates_to_its_second() {
        let schedule = parse_schedule("* * * * * *").unwrap();
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_milli_opt(0, 0, 0, 500)
            .unwrap();
        assert_eq!(next_time(&schedule, start).unwrap(), dt(2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_month_advance_recomputes_weekday_match() {
        // Mondays in June: May 15th 2000 was a Monday, but the weekday
        // match must be rebuilt once the month slot advances to June.
        let schedule = parse_schedule("* * * * JUN MON").unwrap();
        let next = next_time(&schedule, dt(2000, 5, 15, 0, 0, 0)).unwrap();
        assert_eq!(next, dt(2000, 6, 5, 0, 0, 0));
    }

    #[test]
    fn test_impossible_date_exhausts_horizon() {
        let schedule = parse_schedule("* * * 30 2 *").unwrap();
        assert_eq!(
            next_time(&schedule, dt(2000, 1, 1, 0, 0, 0)),
            Err(SearchError::NoMatchingTime)
        );
    }

    #[test]
    fn test_upcoming_is_lazy_and_strictly_increasing() {
        let schedule = parse_schedule("*/20 * * * * *").unwrap();
        let times: Vec<_> = upcoming(&schedule, dt(2000, 1, 1, 0, 0, 0)).take(4).collect();
        assert_eq!(
            times,
            vec![
                dt(2000, 1, 1, 0, 0, 0),
                dt(2000, 1, 1, 0, 0, 20),
                dt(2000, 1, 1, 0, 0, 40),
                dt(2000, 1, 1, 0, 1, 0),
            ]
        );
    }

    #[test]
    fn test_upcoming_ends_when_horizon_is_exhausted() {
        let schedule = parse_schedule("* * * 30 2 *").unwrap();
        let mut iter = upcoming(&schedule, dt(2000, 1, 1, 0, 0, 0));
        assert_eq!(iter.next(), None);
    }
}
