//! Per-record-type validators built once from the schema.
//!
//! A [`ModelValidator`] walks its model's columns, relations, composites,
//! and properties in that order, letting each attribute claim its
//! visibility: columns are available unless hidden or read-only, forward
//! relations replace their backing key column, composites absorb their
//! member columns, properties join when they have a setter. Validation is
//! two-phase: structural errors (unknown/missing attributes) short-circuit,
//! everything after that is gathered so a caller sees every problem at once.

mod column;
pub use column::ColumnValidator;

mod composite;
pub use composite::{OneOfValidator, OneOfValue};

mod input;
pub use input::Input;

mod list;
pub use list::{ListMode, ListValidator};

mod model;
pub use model::ModelValidator;

mod property;
pub use property::PropertyValidator;

mod relation;
pub use relation::RelationValidator;

use sift_core::{Error, ValidationError};

/// Outcome channel for one attribute: an invalid value is collected, a
/// repository fault aborts the whole call.
#[derive(Debug)]
pub enum AttrError {
    Invalid(ValidationError),
    Fault(Error),
}

impl From<ValidationError> for AttrError {
    fn from(err: ValidationError) -> Self {
        AttrError::Invalid(err)
    }
}

impl From<Error> for AttrError {
    fn from(err: Error) -> Self {
        AttrError::Fault(err)
    }
}
