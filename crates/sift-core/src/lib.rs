pub mod error;
pub use error::{Error, ListErrors, ObjectErrors, ValidationError};

pub mod filter;

pub mod reflect;

pub mod schema;
pub use schema::Schema;

pub mod value;
pub use value::Value;

/// A Result type alias that defaults to Sift's [`Error`] type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
