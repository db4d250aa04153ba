//! Positioned parse errors.

use thiserror::Error;

use super::cursor::Symbol;
use crate::core::error::ValidationError;
use crate::core::field::Field;

/// An error raised while scanning a cron expression.
///
/// Carries the character offset into the trimmed expression where
/// scanning stopped, and renders as `"<description>: column [<offset>]"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: column [{position}]")]
pub struct ParseError {
    position: usize,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }

    /// Character offset where scanning stopped.
    pub fn position(&self) -> usize {
        self.position
    }

    /// What went wrong.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// The grammatical violation behind a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A symbol the grammar does not allow at this point.
    #[error("unexpected symbol {symbol}")]
    UnexpectedSymbol { symbol: Symbol },

    /// An uppercase run missing from the field's symbol table.
    #[error("unknown constant {name} for the {field} field")]
    UnknownConstant { field: Field, name: String },

    /// An `@`-token outside the shortcut table.
    #[error("@{name} is not a valid expression")]
    UnknownAttribute { name: String },

    /// A step value that is not a digit run.
    #[error("step value must be an integer, found {symbol}")]
    StepNotInteger { symbol: Symbol },

    /// A digit run too large for the value type.
    #[error("number is too large")]
    NumberTooLarge,

    /// Two fields not separated by whitespace, or input ending early.
    #[error("expected whitespace between fields, found {symbol}")]
    MissingSeparator { symbol: Symbol },

    /// Non-whitespace input left over after a complete expression.
    #[error("extra data after parsing schedule")]
    TrailingInput,

    /// A well-formed value that violates a field's domain invariant.
    #[error("{0}")]
    Invalid(#[source] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_column() {
        let err = ParseError::new(
            7,
            ParseErrorKind::UnexpectedSymbol {
                symbol: Symbol::Slash,
            },
        );
        assert_eq!(err.to_string(), "unexpected symbol '/': column [7]");
    }

    #[test]
    fn test_unknown_constant_names_field() {
        let err = ParseError::new(
            10,
            ParseErrorKind::UnknownConstant {
                field: Field::Month,
                name: "BAD".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "unknown constant BAD for the month field: column [10]"
        );
    }

    #[test]
    fn test_validation_error_is_source() {
        use std::error::Error as _;

        let err = ParseError::new(
            0,
            ParseErrorKind::Invalid(ValidationError::ZeroStep {
                field: Field::Second,
            }),
        );
        assert_eq!(
            err.to_string(),
            "step must be at least 1 in the second field: column [0]"
        );
        assert!(err.kind().source().is_some());
    }
}
