//! End-to-end search coverage: per-field carry, the day OR rule, year
//! rollover, and the bounded and lazy sequence forms.

use chrono::{NaiveDate, NaiveDateTime};
use quando::{next_time, next_times, parse_schedule, SearchError};

fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

fn next(expression: &str, start: NaiveDateTime) -> NaiveDateTime {
    let schedule = parse_schedule(expression).unwrap();
    next_time(&schedule, start).unwrap()
}

#[test]
fn seconds_in_same_minute() {
    assert_eq!(
        next("30 * * * * *", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 1, 1, 0, 0, 30)
    );
}

#[test]
fn seconds_carry_into_next_minute() {
    assert_eq!(
        next("0 * * * * *", dt(2000, 1, 1, 0, 0, 30)),
        dt(2000, 1, 1, 0, 1, 0)
    );
}

#[test]
fn minutes_in_same_hour() {
    assert_eq!(
        next("* 30 * * * *", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 1, 1, 0, 30, 0)
    );
}

#[test]
fn minutes_carry_into_next_hour() {
    assert_eq!(
        next("* 0 * * * *", dt(2000, 1, 1, 0, 30, 0)),
        dt(2000, 1, 1, 1, 0, 0)
    );
}

#[test]
fn hours_in_same_day() {
    assert_eq!(
        next("* * 6 * * *", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 1, 1, 6, 0, 0)
    );
}

#[test]
fn hours_carry_into_next_day() {
    assert_eq!(
        next("* * 0 * * *", dt(2000, 1, 1, 6, 0, 0)),
        dt(2000, 1, 2, 0, 0, 0)
    );
}

#[test]
fn day_of_month_in_same_month() {
    assert_eq!(
        next("* * * 15 * *", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 1, 15, 0, 0, 0)
    );
}

#[test]
fn day_of_month_carries_into_next_month() {
    assert_eq!(
        next("* * * 1 * *", dt(2000, 1, 15, 0, 0, 0)),
        dt(2000, 2, 1, 0, 0, 0)
    );
}

#[test]
fn day_of_week_in_same_month() {
    // January 1st 2000 was a Saturday.
    assert_eq!(
        next("* * * * * SUN", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 1, 2, 0, 0, 0)
    );
}

#[test]
fn day_of_week_carries_into_next_month() {
    assert_eq!(
        next("* * * * * TUE", dt(2000, 1, 30, 0, 0, 0)),
        dt(2000, 2, 1, 0, 0, 0)
    );
}

#[test]
fn day_or_rule_takes_day_of_month_when_earlier() {
    assert_eq!(
        next("* * * 2 * THR", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 1, 2, 0, 0, 0)
    );
}

#[test]
fn day_or_rule_takes_day_of_week_when_earlier() {
    assert_eq!(
        next("* * * 15 * WED", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 1, 5, 0, 0, 0)
    );
}

#[test]
fn month_in_same_year() {
    assert_eq!(
        next("* * * * JUN *", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 6, 1, 0, 0, 0)
    );
}

#[test]
fn month_rolls_into_next_year() {
    assert_eq!(
        next("* * * * JAN *", dt(2000, 6, 1, 0, 0, 0)),
        dt(2001, 1, 1, 0, 0, 0)
    );
}

#[test]
fn all_fields_constrained_at_once() {
    assert_eq!(
        next("24 30 5 2 MAR *", dt(2000, 1, 1, 0, 0, 0)),
        dt(2000, 3, 2, 5, 30, 24)
    );
}

#[test]
fn start_inside_a_day_range_matches_immediately() {
    assert_eq!(
        next("* * * 2-5 * *", dt(2000, 1, 3, 0, 0, 0)),
        dt(2000, 1, 3, 0, 0, 0)
    );
}

#[test]
fn start_inside_an_hour_list_matches_immediately() {
    assert_eq!(
        next("* * 3,4,5 * * *", dt(2000, 1, 1, 5, 0, 0)),
        dt(2000, 1, 1, 5, 0, 0)
    );
}

#[test]
fn minute_steps_pick_the_next_step_value() {
    assert_eq!(
        next("* */5 * * * *", dt(2000, 1, 1, 0, 1, 0)),
        dt(2000, 1, 1, 0, 5, 0)
    );
}

#[test]
fn leap_day_schedule_waits_for_a_leap_year() {
    assert_eq!(
        next("0 0 0 29 2 *", dt(2000, 3, 1, 0, 0, 0)),
        dt(2004, 2, 29, 0, 0, 0)
    );
}

#[test]
fn shortcut_schedules_search_like_their_expressions() {
    let start = dt(2000, 6, 15, 7, 30, 30);
    assert_eq!(
        next("@yearly", start),
        dt(2001, 1, 1, 0, 0, 0)
    );
    assert_eq!(next("@monthly", start), dt(2000, 7, 1, 0, 0, 0));
    // June 18th 2000 was a Sunday.
    assert_eq!(next("@weekly", start), dt(2000, 6, 18, 0, 0, 0));
    assert_eq!(next("@daily", start), dt(2000, 6, 16, 0, 0, 0));
    assert_eq!(next("@hourly", start), dt(2000, 6, 15, 8, 0, 0));
}

#[test]
fn next_times_includes_a_matching_start() {
    let schedule = parse_schedule("0 * * * * *").unwrap();
    let start = dt(2000, 1, 1, 0, 0, 0);

    assert_eq!(next_times(&schedule, start, 1).unwrap(), vec![start]);
    assert_eq!(
        next_times(&schedule, start, 3).unwrap(),
        vec![start, dt(2000, 1, 1, 0, 1, 0), dt(2000, 1, 1, 0, 2, 0)]
    );
}

#[test]
fn next_times_spans_years() {
    let schedule = parse_schedule("0 0 0 1 JAN *").unwrap();
    assert_eq!(
        next_times(&schedule, dt(2000, 1, 1, 0, 0, 0), 3).unwrap(),
        vec![
            dt(2000, 1, 1, 0, 0, 0),
            dt(2001, 1, 1, 0, 0, 0),
            dt(2002, 1, 1, 0, 0, 0),
        ]
    );
}

#[test]
fn next_times_never_repeats_a_second() {
    let schedule = parse_schedule("* * * * * *").unwrap();
    let times = next_times(&schedule, dt(2000, 1, 1, 0, 0, 58), 4).unwrap();
    assert_eq!(
        times,
        vec![
            dt(2000, 1, 1, 0, 0, 58),
            dt(2000, 1, 1, 0, 0, 59),
            dt(2000, 1, 1, 0, 1, 0),
            dt(2000, 1, 1, 0, 1, 1),
        ]
    );
}

#[test]
fn next_times_with_zero_count_is_an_error() {
    let schedule = parse_schedule("0 * * * * *").unwrap();
    assert_eq!(
        next_times(&schedule, dt(2000, 1, 1, 0, 0, 0), 0),
        Err(SearchError::InvalidCount)
    );
}

#[test]
fn upcoming_matches_next_times() {
    let schedule = parse_schedule("0 0 12 * * *").unwrap();
    let start = dt(2000, 1, 1, 0, 0, 0);

    let lazy: Vec<_> = schedule.upcoming(start).take(5).collect();
    assert_eq!(lazy, next_times(&schedule, start, 5).unwrap());
}

#[test]
fn upcoming_restarts_from_the_original_start() {
    let schedule = parse_schedule("30 * * * * *").unwrap();
    let start = dt(2000, 1, 1, 0, 0, 0);

    let mut first = schedule.upcoming(start);
    first.next();
    first.next();

    let mut fresh = schedule.upcoming(start);
    assert_eq!(fresh.next(), Some(dt(2000, 1, 1, 0, 0, 30)));
}

#[test]
fn impossible_schedule_reports_no_matching_time() {
    let schedule = parse_schedule("* * * 30 2 *").unwrap();
    assert_eq!(
        next_time(&schedule, dt(2000, 1, 1, 0, 0, 0)),
        Err(SearchError::NoMatchingTime)
    );
    assert_eq!(
        next_times(&schedule, dt(2000, 1, 1, 0, 0, 0), 2),
        Err(SearchError::NoMatchingTime)
    );
}

#[test]
fn day_31_skips_short_months() {
    assert_eq!(
        next("0 0 0 31 * *", dt(2000, 4, 1, 0, 0, 0)),
        dt(2000, 5, 31, 0, 0, 0)
    );
}

#[test]
fn schedule_conveniences_delegate_to_the_engine() {
    let schedule = parse_schedule("30 * * * * *").unwrap();
    let start = dt(2000, 1, 1, 0, 0, 0);

    assert_eq!(schedule.next_after(start).unwrap(), dt(2000, 1, 1, 0, 0, 30));
    assert_eq!(
        schedule.next_n_after(start, 2).unwrap(),
        vec![dt(2000, 1, 1, 0, 0, 30), dt(2000, 1, 1, 0, 1, 30)]
    );
}
