use super::Error;
use std::path::{Path, PathBuf};

/// Error when an input document, a fields file or a stub cannot be found.
#[derive(Debug)]
pub(super) struct FileNotFound {
    path: PathBuf,
}

impl std::error::Error for FileNotFound {}

impl core::fmt::Display for FileNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "file not found: {}", self.path.display())
    }
}

impl Error {
    /// Creates a file-not-found error.
    pub fn file_not_found(path: impl AsRef<Path>) -> Error {
        Error::from(super::ErrorKind::FileNotFound(FileNotFound {
            path: path.as_ref().to_path_buf(),
        }))
    }

    /// Returns `true` if this error is a file-not-found error.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::FileNotFound(_))
    }
}
