use super::Error;

/// Error when a field descriptor cannot be parsed.
///
/// This occurs when:
/// - A `name#type` token is missing its `#type` part
/// - The field name or type is empty
/// - A structured field object has no `name` or `type`
#[derive(Debug)]
pub(super) struct MalformedFieldSpec {
    token: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for MalformedFieldSpec {}

impl core::fmt::Display for MalformedFieldSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed field spec `{}`: {}", self.token, self.reason)
    }
}

impl Error {
    /// Creates a malformed field spec error for the offending token.
    pub fn malformed_field_spec(token: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MalformedFieldSpec(MalformedFieldSpec {
            token: token.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a malformed field spec error.
    pub fn is_malformed_field_spec(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MalformedFieldSpec(_))
    }
}
