mod boolean;

mod date;
pub use date::DateConstraint;

mod datetime;
pub use datetime::{DateTimeBound, DateTimeConstraint};

mod enums;
pub use enums::EnumConstraint;

mod guid;

mod integer;
pub use integer::{IntWidth, IntegerConstraint};

mod numeric;
pub use numeric::NumericConstraint;

mod string;
pub use string::StringConstraint;

mod time;
pub use time::TimeConstraint;

use super::ScalarType;
use crate::{error::ValidationError, Value};

/// Per-type value constraints attached to a column.
///
/// Each variant knows how to coerce loosely-typed caller input into its
/// typed [`Value`] (`transform`) and how to run its sequence of bound checks
/// (`check`). Both sides report [`ValidationError`] data, never faults.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    Boolean,
    Date(DateConstraint),
    DateTime(DateTimeConstraint),
    Enum(EnumConstraint),
    Guid,
    Integer(IntegerConstraint),
    Numeric(NumericConstraint),
    /// Shared by String and Text columns; the column's own type tells the
    /// two apart.
    String(StringConstraint),
    Time(TimeConstraint),
}

impl Constraint {
    /// The scalar type this constraint coerces to. String constraints
    /// resolve to Text on the owning column when `max_length` is absent.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Constraint::Boolean => ScalarType::Boolean,
            Constraint::Date(_) => ScalarType::Date,
            Constraint::DateTime(_) => ScalarType::DateTime,
            Constraint::Enum(_) => ScalarType::Enum,
            Constraint::Guid => ScalarType::Guid,
            Constraint::Integer(_) => ScalarType::Integer,
            Constraint::Numeric(_) => ScalarType::Numeric,
            Constraint::String(constraint) => {
                if constraint.max_length.is_some() {
                    ScalarType::String
                } else {
                    ScalarType::Text
                }
            }
            Constraint::Time(_) => ScalarType::Time,
        }
    }

    /// Coerces caller input into this constraint's value type.
    ///
    /// Null passes through untouched; nullability is the attribute's rule,
    /// not the type's.
    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        if raw.is_null() {
            return Ok(Value::Null);
        }
        match self {
            Constraint::Boolean => boolean::transform(raw),
            Constraint::Date(constraint) => constraint.transform(raw),
            Constraint::DateTime(constraint) => constraint.transform(raw),
            Constraint::Enum(constraint) => constraint.transform(raw),
            Constraint::Guid => guid::transform(raw),
            Constraint::Integer(constraint) => constraint.transform(raw),
            Constraint::Numeric(constraint) => constraint.transform(raw),
            Constraint::String(constraint) => constraint.transform(raw),
            Constraint::Time(constraint) => constraint.transform(raw),
        }
    }

    /// Runs the constraint's check sequence against an already-coerced
    /// value, stopping at the first violated bound.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_null() {
            return Ok(());
        }
        match self {
            Constraint::Boolean | Constraint::Guid => Ok(()),
            Constraint::Date(constraint) => constraint.check(value),
            Constraint::DateTime(constraint) => constraint.check(value),
            Constraint::Enum(constraint) => constraint.check(value),
            Constraint::Integer(constraint) => constraint.check(value),
            Constraint::Numeric(constraint) => constraint.check(value),
            Constraint::String(constraint) => constraint.check(value),
            Constraint::Time(constraint) => constraint.check(value),
        }
    }
}
