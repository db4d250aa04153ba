//! Field constraints: the value masks a cron expression is made of.
//!
//! A [`Mask`] describes which values one schedule field admits, as one of
//! `*`, a single value, an inclusive range, a step over a base, or a
//! comma list. Masks are immutable values with structural equality.

use std::fmt;

use crate::core::error::ValidationError;
use crate::core::field::Field;

/// The constraint for a single schedule field.
///
/// Build masks through the checked constructors ([`Mask::single`],
/// [`Mask::range`], [`Mask::step`], [`Mask::list`]); they reject values
/// that violate the field's domain. [`Schedule`](crate::Schedule)
/// re-validates its masks on construction, so a hand-assembled variant
/// that skipped the constructors is still caught before it can be
/// searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mask {
    /// Every value in the field's range, `*`.
    All(Field),
    /// Exactly one value, `n`.
    Single(Field, u32),
    /// Every value in an inclusive range, `n-m`.
    Range(Field, u32, u32),
    /// Every step-th value of the base's enumeration, `base/step`.
    Step(Box<Mask>, u32),
    /// The union of two or more non-list masks, `x,y,z`.
    List(Field, Vec<Mask>),
}

impl Mask {
    /// A mask matching the whole field range.
    pub fn all(field: Field) -> Self {
        Mask::All(field)
    }

    /// A mask matching exactly `value`.
    pub fn single(field: Field, value: u32) -> Result<Self, ValidationError> {
        let mask = Mask::Single(field, value);
        mask.validate(field)?;
        Ok(mask)
    }

    /// A mask matching every value in `[start, end]`.
    pub fn range(field: Field, start: u32, end: u32) -> Result<Self, ValidationError> {
        let mask = Mask::Range(field, start, end);
        mask.validate(field)?;
        Ok(mask)
    }

    /// A mask matching every `step`-th value of `base`.
    ///
    /// The base must be [`Mask::All`], [`Mask::Single`], or
    /// [`Mask::Range`].
    pub fn step(base: Mask, step: u32) -> Result<Self, ValidationError> {
        let field = base.field();
        let mask = Mask::Step(Box::new(base), step);
        mask.validate(field)?;
        Ok(mask)
    }

    /// A mask matching the union of `items`.
    ///
    /// Items must be non-list masks bound to `field`.
    pub fn list(field: Field, items: Vec<Mask>) -> Result<Self, ValidationError> {
        let mask = Mask::List(field, items);
        mask.validate(field)?;
        Ok(mask)
    }

    /// The field this mask is bound to.
    pub fn field(&self) -> Field {
        match self {
            Mask::All(field)
            | Mask::Single(field, _)
            | Mask::Range(field, _, _)
            | Mask::List(field, _) => *field,
            Mask::Step(base, _) => base.field(),
        }
    }

    /// Check the mask's invariants against the field it is used for.
    pub fn validate(&self, field: Field) -> Result<(), ValidationError> {
        match self {
            Mask::All(bound) => check_binding(*bound, field),
            Mask::Single(bound, value) => {
                check_binding(*bound, field)?;
                check_in_range(field, *value)
            }
            Mask::Range(bound, start, end) => {
                check_binding(*bound, field)?;
                check_in_range(field, *start)?;
                check_in_range(field, *end)?;
                if start > end {
                    return Err(ValidationError::InvertedRange {
                        field,
                        start: *start,
                        end: *end,
                    });
                }
                Ok(())
            }
            Mask::Step(base, step) => {
                if *step == 0 {
                    return Err(ValidationError::ZeroStep { field });
                }
                if matches!(**base, Mask::Step(..) | Mask::List(..)) {
                    return Err(ValidationError::InvalidStepBase { field });
                }
                base.validate(field)
            }
            Mask::List(bound, items) => {
                check_binding(*bound, field)?;
                if items.is_empty() {
                    return Err(ValidationError::EmptyList { field });
                }
                for item in items {
                    if matches!(item, Mask::List(..)) {
                        return Err(ValidationError::NestedList { field });
                    }
                    item.validate(field)?;
                }
                Ok(())
            }
        }
    }

    /// All concrete values this mask admits, ascending.
    ///
    /// A step keeps the first value of its base's enumeration
    /// unconditionally, then every value whose 0-based position is a
    /// multiple of the step. A single-value step base enumerates from its
    /// value to the field maximum, so `3/5` over seconds yields
    /// 3, 8, …, 58. List values are deduplicated.
    pub fn values(&self) -> Vec<u32> {
        match self {
            Mask::All(field) => field.range().collect(),
            Mask::Single(_, value) => vec![*value],
            Mask::Range(_, start, end) => (*start..=*end).collect(),
            Mask::Step(base, step) => {
                let base_values: Vec<u32> = match &**base {
                    Mask::Single(field, value) => (*value..=field.max()).collect(),
                    other => other.values(),
                };
                let step = *step as usize;
                base_values
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| *i == 0 || i.checked_rem(step) == Some(0))
                    .map(|(_, value)| value)
                    .collect()
            }
            Mask::List(_, items) => {
                let mut values: Vec<u32> = items.iter().flat_map(Mask::values).collect();
                values.sort_unstable();
                values.dedup();
                values
            }
        }
    }

    /// Whether the mask admits `value`.
    pub fn contains(&self, value: u32) -> bool {
        match self {
            Mask::All(field) => field.contains(value),
            Mask::Single(_, single) => *single == value,
            Mask::Range(_, start, end) => (*start..=*end).contains(&value),
            Mask::Step(..) | Mask::List(..) => self.values().contains(&value),
        }
    }
}

fn check_binding(bound: Field, expected: Field) -> Result<(), ValidationError> {
    if bound == expected {
        Ok(())
    } else {
        Err(ValidationError::FieldMismatch {
            expected,
            found: bound,
        })
    }
}

fn check_in_range(field: Field, value: u32) -> Result<(), ValidationError> {
    if field.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, value })
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mask::All(_) => f.write_str("*"),
            Mask::Single(_, value) => write!(f, "{}", value),
            Mask::Range(_, start, end) => write!(f, "{}-{}", start, end),
            Mask::Step(base, step) => write!(f, "{}/{}", base, step),
            Mask::List(_, items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}
