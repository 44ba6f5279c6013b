use super::Error;

/// Error when the input document is not valid JSON or does not have the
/// expected shape (groups of entity objects).
#[derive(Debug)]
pub(super) struct InvalidInput {
    message: Box<str>,
}

impl std::error::Error for InvalidInput {}

impl core::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid input: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidInput(InvalidInput {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid input error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidInput(_))
    }
}
