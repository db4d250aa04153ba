//! Cron expression parsing and next-occurrence search with second
//! precision.
//!
//! Expressions use six fields (`second minute hour day-of-month month
//! day-of-week`) with the standard `*`, `,`, `-`, `/` symbols and
//! three-letter month and weekday names, or one `@`-shortcut token.
//! Parsing produces an immutable [`Schedule`]; the [`search`] module
//! finds the instants it matches.
//!
//! ```
//! use chrono::NaiveDate;
//! use quando::parse_schedule;
//!
//! let schedule = parse_schedule("30 * * * * *").unwrap();
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//!
//! let next = schedule.next_after(start).unwrap();
//! assert_eq!(next, start + chrono::Duration::seconds(30));
//! ```

pub mod clock;
pub mod core;
pub mod parser;
pub mod search;
pub mod testing;

pub use crate::clock::{Clock, SystemClock};
pub use crate::core::error::ValidationError;
pub use crate::core::field::Field;
pub use crate::core::mask::Mask;
pub use crate::core::schedule::Schedule;
pub use crate::parser::{parse_schedule, ParseError, ParseErrorKind, ScheduleParser, Symbol};
pub use crate::search::{next_time, next_times, upcoming, SearchError, Upcoming};
