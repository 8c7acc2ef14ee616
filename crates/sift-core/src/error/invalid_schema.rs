use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - A model declares duplicate attribute names
/// - A relation references a model that was never registered
/// - A composite claims members that are missing, required, or not columns
/// - Constraint parameters contradict each other (gt with gte, empty ranges)
///
/// These errors are caught during schema construction at process start; they
/// indicate a programming error in the schema declaration, not a runtime
/// condition.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
