pub mod repo;
pub use repo::Repository;

pub mod validate;
pub use validate::{Input, ListMode, ListValidator, ModelValidator, OneOfValue};

pub use sift_core::{
    filter, reflect, schema, value, Error, ListErrors, ObjectErrors, Result, Schema,
    ValidationError, Value,
};

pub use async_trait::async_trait;
