//! Schedule value types: fields, masks, and the schedule aggregate.
//!
//! Everything in this module is an immutable value with structural
//! equality, validated at construction.

pub mod error;
pub mod field;
pub mod mask;
pub mod schedule;

pub use error::ValidationError;
pub use field::Field;
pub use mask::Mask;
pub use schedule::Schedule;
