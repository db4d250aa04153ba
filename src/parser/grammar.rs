//! The recursive-descent grammar over the scan cursor.
//!
//! An expression is either one `@`-token or six whitespace-separated
//! fields in the order second, minute, hour, day of month, month, day of
//! week. Each field is a comma list of items; an item is `*`, a constant,
//! a range, or any of those under a `/step`.

use tracing::trace;

use super::cursor::{ParseCursor, Symbol};
use super::error::{ParseError, ParseErrorKind};
use crate::clock::{Clock, SystemClock};
use crate::core::error::ValidationError;
use crate::core::field::Field;
use crate::core::mask::Mask;
use crate::core::schedule::Schedule;

/// Parse a cron expression, with the system clock backing `@now` and
/// `@reboot`.
pub fn parse_schedule(text: &str) -> Result<Schedule, ParseError> {
    ScheduleParser::new().parse(text)
}

/// A cron expression parser.
///
/// The parser itself is stateless between invocations; the clock is only
/// consulted for the `@now` and `@reboot` tokens, so tests inject a
/// [`FixedClock`](crate::testing::FixedClock) to pin their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleParser<C = SystemClock> {
    clock: C,
}

impl ScheduleParser {
    /// A parser backed by the system clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> ScheduleParser<C> {
    /// A parser backed by the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Parse `text` into a schedule.
    ///
    /// Leading and trailing whitespace is ignored; error positions count
    /// characters from the first non-whitespace character.
    pub fn parse(&self, text: &str) -> Result<Schedule, ParseError> {
        let trimmed = text.trim();
        let mut cursor = ParseCursor::new(trimmed);

        let schedule = if cursor.symbol() == Symbol::At {
            cursor.advance();
            self.parse_special_attribute(&mut cursor)?
        } else {
            let second = parse_field(&mut cursor, Field::Second)?;
            let minute = parse_next_field(&mut cursor, Field::Minute)?;
            let hour = parse_next_field(&mut cursor, Field::Hour)?;
            let day_of_month = parse_next_field(&mut cursor, Field::DayOfMonth)?;
            let month = parse_next_field(&mut cursor, Field::Month)?;
            let day_of_week = parse_next_field(&mut cursor, Field::DayOfWeek)?;

            Schedule::new(second, minute, hour, day_of_month, month, day_of_week)
                .map_err(|source| ParseError::new(0, ParseErrorKind::Invalid(source)))?
        };

        cursor.skip_whitespace();
        if cursor.symbol() != Symbol::End {
            return Err(ParseError::new(
                cursor.position(),
                ParseErrorKind::TrailingInput,
            ));
        }

        trace!(expression = %trimmed, schedule = %schedule, "Parsed cron expression");
        Ok(schedule)
    }

    /// Resolve the lowercase token after an `@` to its shortcut schedule.
    fn parse_special_attribute(&self, cursor: &mut ParseCursor) -> Result<Schedule, ParseError> {
        let start = cursor.position();
        let name = cursor.read_lower();

        match name.as_str() {
            "yearly" | "annually" => Ok(Schedule::yearly()),
            "monthly" => Ok(Schedule::monthly()),
            "weekly" => Ok(Schedule::weekly()),
            "daily" => Ok(Schedule::daily()),
            "hourly" => Ok(Schedule::hourly()),
            "now" | "reboot" => Ok(Schedule::now(&self.clock)),
            _ => Err(ParseError::new(
                start,
                ParseErrorKind::UnknownAttribute { name },
            )),
        }
    }
}

/// Require a whitespace separator, then parse the field after it.
fn parse_next_field(cursor: &mut ParseCursor, field: Field) -> Result<Mask, ParseError> {
    match cursor.symbol() {
        Symbol::Whitespace => parse_field(cursor, field),
        symbol => Err(ParseError::new(
            cursor.position(),
            ParseErrorKind::MissingSeparator { symbol },
        )),
    }
}

/// Parse one field: an item, or a comma list of items.
fn parse_field(cursor: &mut ParseCursor, field: Field) -> Result<Mask, ParseError> {
    cursor.skip_whitespace();
    let start = cursor.position();

    let first = parse_item(cursor, field)?;
    if cursor.symbol() != Symbol::Comma {
        return Ok(first);
    }

    let mut items = vec![first];
    while cursor.symbol() == Symbol::Comma {
        cursor.advance();
        items.push(parse_item(cursor, field)?);
    }
    checked(start, Mask::list(field, items))
}

/// Parse one continuous-range item by dispatch on the current symbol.
fn parse_item(cursor: &mut ParseCursor, field: Field) -> Result<Mask, ParseError> {
    let start = cursor.position();

    match cursor.symbol() {
        Symbol::Asterisk => {
            cursor.advance();
            match cursor.symbol() {
                Symbol::Slash => {
                    cursor.advance();
                    let step = read_step(cursor)?;
                    checked(start, Mask::step(Mask::all(field), step))
                }
                Symbol::Whitespace | Symbol::Comma | Symbol::End => Ok(Mask::all(field)),
                symbol => Err(ParseError::new(
                    cursor.position(),
                    ParseErrorKind::UnexpectedSymbol { symbol },
                )),
            }
        }
        Symbol::Digit | Symbol::UpperChar => {
            let value = read_constant(cursor, field)?;
            match cursor.symbol() {
                Symbol::Hyphen => {
                    cursor.advance();
                    let end = match cursor.symbol() {
                        Symbol::Digit | Symbol::UpperChar => read_constant(cursor, field)?,
                        symbol => {
                            return Err(ParseError::new(
                                cursor.position(),
                                ParseErrorKind::UnexpectedSymbol { symbol },
                            ));
                        }
                    };
                    let range = checked(start, Mask::range(field, value, end))?;
                    if cursor.symbol() == Symbol::Slash {
                        cursor.advance();
                        let step = read_step(cursor)?;
                        checked(start, Mask::step(range, step))
                    } else {
                        Ok(range)
                    }
                }
                Symbol::Slash => {
                    cursor.advance();
                    let step = read_step(cursor)?;
                    let single = checked(start, Mask::single(field, value))?;
                    checked(start, Mask::step(single, step))
                }
                _ => checked(start, Mask::single(field, value)),
            }
        }
        symbol => Err(ParseError::new(
            start,
            ParseErrorKind::UnexpectedSymbol { symbol },
        )),
    }
}

/// Read a constant: a digit run, or an uppercase run resolved in the
/// field's symbol table.
fn read_constant(cursor: &mut ParseCursor, field: Field) -> Result<u32, ParseError> {
    match cursor.symbol() {
        Symbol::Digit => cursor.read_digits(),
        Symbol::UpperChar => {
            let start = cursor.position();
            let name = cursor.read_upper();
            field
                .value_of(&name)
                .ok_or_else(|| ParseError::new(start, ParseErrorKind::UnknownConstant { field, name }))
        }
        symbol => Err(ParseError::new(
            cursor.position(),
            ParseErrorKind::UnexpectedSymbol { symbol },
        )),
    }
}

/// Read the digit run after a `/`.
fn read_step(cursor: &mut ParseCursor) -> Result<u32, ParseError> {
    match cursor.symbol() {
        Symbol::Digit => cursor.read_digits(),
        symbol => Err(ParseError::new(
            cursor.position(),
            ParseErrorKind::StepNotInteger { symbol },
        )),
    }
}

/// Wrap a mask-construction failure into a positioned parse error.
fn checked(position: usize, result: Result<Mask, ValidationError>) -> Result<Mask, ParseError> {
    result.map_err(|source| ParseError::new(position, ParseErrorKind::Invalid(source)))
}
