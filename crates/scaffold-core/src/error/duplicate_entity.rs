use super::Error;

/// Error when a model class is declared more than once in a document.
///
/// Every model class owns one table, so a second declaration would schedule a
/// second migration for the same table.
#[derive(Debug)]
pub(super) struct DuplicateEntity {
    model_class: Box<str>,
}

impl std::error::Error for DuplicateEntity {}

impl core::fmt::Display for DuplicateEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model class `{}` is declared more than once", self.model_class)
    }
}

impl Error {
    pub fn duplicate_entity(model_class: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateEntity(DuplicateEntity {
            model_class: model_class.into().into(),
        }))
    }

    pub fn is_duplicate_entity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateEntity(_))
    }
}
