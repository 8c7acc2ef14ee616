use super::Error;

/// Error when a filter expression cannot be compiled against the schema.
///
/// This occurs when:
/// - A path names an attribute the model does not have
/// - A path traverses through a non-relation attribute
/// - The operator is unknown, or not registered for the column's type
/// - A boolean group is empty or its body is not a mapping
#[derive(Debug)]
pub(super) struct InvalidFilter {
    message: Box<str>,
}

impl std::error::Error for InvalidFilter {}

impl core::fmt::Display for InvalidFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid filter: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid filter error.
    pub fn invalid_filter(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidFilter(InvalidFilter {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid filter error.
    pub fn is_invalid_filter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidFilter(_))
    }
}
