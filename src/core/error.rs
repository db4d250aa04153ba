//! Validation failures raised when building masks and schedules.

use thiserror::Error;

use crate::core::field::Field;

/// Errors raised when a structurally well-formed mask or schedule violates
/// a domain invariant.
///
/// Every variant names the offending value(s) and the field involved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A value lies outside its field's range.
    #[error("value {value} is out of range for the {field} field")]
    OutOfRange { field: Field, value: u32 },

    /// A range whose start exceeds its end.
    #[error("range start {start} must not exceed end {end} in the {field} field")]
    InvertedRange { field: Field, start: u32, end: u32 },

    /// A step of zero.
    #[error("step must be at least 1 in the {field} field")]
    ZeroStep { field: Field },

    /// A step whose base is another step or a list.
    #[error("step base must be a single value, a range, or `*` in the {field} field")]
    InvalidStepBase { field: Field },

    /// A list with no items.
    #[error("list must not be empty in the {field} field")]
    EmptyList { field: Field },

    /// A list item that is itself a list.
    #[error("list items must not be nested lists in the {field} field")]
    NestedList { field: Field },

    /// A mask built for one field used where another was expected.
    #[error("mask for the {found} field cannot be used in the {expected} field")]
    FieldMismatch { expected: Field, found: Field },
}
