use super::Error;
use std::path::{Path, PathBuf};

/// Error when a generated class would overwrite an existing source file.
///
/// Existence is judged by the expected output path. Whether this aborts the
/// job depends on the configured collision policy.
#[derive(Debug)]
pub(super) struct ClassAlreadyExists {
    class: Box<str>,
    path: PathBuf,
}

impl std::error::Error for ClassAlreadyExists {}

impl core::fmt::Display for ClassAlreadyExists {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "class `{}` already exists at {}",
            self.class,
            self.path.display()
        )
    }
}

impl Error {
    /// Creates a class-already-exists error.
    pub fn class_already_exists(class: impl Into<String>, path: impl AsRef<Path>) -> Error {
        Error::from(super::ErrorKind::ClassAlreadyExists(ClassAlreadyExists {
            class: class.into().into(),
            path: path.as_ref().to_path_buf(),
        }))
    }

    /// Returns `true` if this error is a class-already-exists error.
    pub fn is_class_already_exists(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ClassAlreadyExists(_))
    }
}
