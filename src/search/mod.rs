//! Next-occurrence search over parsed schedules.
//!
//! This module finds the earliest instant at or after a start time that
//! satisfies every mask of a [`Schedule`](crate::Schedule), and lazy or
//! bounded sequences of such instants.

mod engine;

pub use engine::{next_time, next_times, upcoming, SearchError, Upcoming, SEARCH_HORIZON_YEARS};
