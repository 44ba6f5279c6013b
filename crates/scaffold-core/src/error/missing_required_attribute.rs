use super::Error;

/// An entity node lacks one of the attributes the generator expects.
///
/// Usually reported as a warning. Only a missing `name` is fatal, since none
/// of the derived names can be computed without it.
#[derive(Debug)]
pub(super) struct MissingRequiredAttribute {
    entity: Box<str>,
    attribute: Box<str>,
}

impl std::error::Error for MissingRequiredAttribute {}

impl core::fmt::Display for MissingRequiredAttribute {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing required attribute `{}` on entity `{}`",
            self.attribute, self.entity
        )
    }
}

impl Error {
    pub fn missing_required_attribute(
        entity: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::MissingRequiredAttribute(
            MissingRequiredAttribute {
                entity: entity.into().into(),
                attribute: attribute.into().into(),
            },
        ))
    }

    pub fn is_missing_required_attribute(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingRequiredAttribute(_))
    }
}
