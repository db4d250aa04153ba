//! Recursive-descent parsing of cron expressions.
//!
//! The scanner walks the trimmed expression strictly left to right with
//! one symbol of lookahead and no backtracking. Errors carry the
//! character offset where scanning stopped.

mod cursor;
mod error;
mod grammar;

pub use cursor::Symbol;
pub use error::{ParseError, ParseErrorKind};
pub use grammar::{parse_schedule, ScheduleParser};
