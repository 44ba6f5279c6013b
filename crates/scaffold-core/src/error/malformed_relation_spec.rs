use super::Error;

/// Error when a pre-declared relationship or foreign key descriptor is not in
/// the `name#kind#target|localKey|foreignKey` or
/// `column#refColumn#refTable#onUpdate#onDelete` form.
#[derive(Debug)]
pub(super) struct MalformedRelationSpec {
    token: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for MalformedRelationSpec {}

impl core::fmt::Display for MalformedRelationSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed relation spec `{}`: {}", self.token, self.reason)
    }
}

impl Error {
    /// Creates a malformed relationship / foreign key descriptor error.
    pub fn malformed_relation_spec(token: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MalformedRelationSpec(
            MalformedRelationSpec {
                token: token.into().into(),
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a malformed relation spec error.
    pub fn is_malformed_relation_spec(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MalformedRelationSpec(_))
    }
}
