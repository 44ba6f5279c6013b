mod adhoc;
mod class_already_exists;
mod cyclic_entity_graph;
mod duplicate_entity;
mod file_not_found;
mod invalid_input;
mod malformed_field_spec;
mod malformed_relation_spec;
mod missing_required_attribute;

use adhoc::AdhocError;
use class_already_exists::ClassAlreadyExists;
use cyclic_entity_graph::CyclicEntityGraph;
use duplicate_entity::DuplicateEntity;
use file_not_found::FileNotFound;
use invalid_input::InvalidInput;
use malformed_field_spec::MalformedFieldSpec;
use malformed_relation_spec::MalformedRelationSpec;
use missing_required_attribute::MissingRequiredAttribute;
use std::sync::Arc;

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while expanding or generating scaffolding.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        if let Some(inner) = err.inner.as_mut().and_then(Arc::get_mut) {
            if inner.cause.is_none() {
                inner.cause = Some(self);
                return err;
            }
        }
        // Shared or already chained consequent: keep its message, re-root the chain.
        Error::from(ErrorKind::Adhoc(AdhocError::new(err.to_string()))).with_cause(self)
    }

    fn with_cause(mut self, cause: Error) -> Error {
        if let Some(inner) = self.inner.as_mut().and_then(Arc::get_mut) {
            inner.cause = Some(cause);
        }
        self
    }

    /// Creates an ad-hoc error from format arguments.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(args.to_string())))
    }

    /// Returns the innermost error of the context chain.
    pub fn root(&self) -> &Error {
        let mut root = self;
        for err in self.chain() {
            root = err;
        }
        root
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    ClassAlreadyExists(ClassAlreadyExists),
    CyclicEntityGraph(CyclicEntityGraph),
    DuplicateEntity(DuplicateEntity),
    FileNotFound(FileNotFound),
    InvalidInput(InvalidInput),
    MalformedFieldSpec(MalformedFieldSpec),
    MalformedRelationSpec(MalformedRelationSpec),
    MissingRequiredAttribute(MissingRequiredAttribute),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            ClassAlreadyExists(err) => core::fmt::Display::fmt(err, f),
            CyclicEntityGraph(err) => core::fmt::Display::fmt(err, f),
            DuplicateEntity(err) => core::fmt::Display::fmt(err, f),
            FileNotFound(err) => core::fmt::Display::fmt(err, f),
            InvalidInput(err) => core::fmt::Display::fmt(err, f),
            MalformedFieldSpec(err) => core::fmt::Display::fmt(err, f),
            MalformedRelationSpec(err) => core::fmt::Display::fmt(err, f),
            MissingRequiredAttribute(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown scaffold error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::invalid_input(err.to_string())
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("bad entity: {}", 7));
        assert_eq!(err.to_string(), "bad entity: 7");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::malformed_field_spec("title", "missing `#type`");
        let chained = root
            .context(err!("entity `Post`"))
            .context(err!("group 0"));

        assert_eq!(
            chained.to_string(),
            "group 0: entity `Post`: malformed field spec `title`: missing `#type`"
        );
        assert!(chained.root().is_malformed_field_spec());
        assert!(!chained.is_malformed_field_spec());
    }

    #[test]
    fn io_error_bridge() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn json_error_bridge() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn cyclic_entity_graph_display() {
        let err = Error::cyclic_entity_graph(["Category", "Category"]);
        assert_eq!(
            err.to_string(),
            "cyclic entity graph: Category -> Category"
        );
    }

    #[test]
    fn missing_attribute_display() {
        let err = Error::missing_required_attribute("Post", "routePath");
        assert_eq!(
            err.to_string(),
            "missing required attribute `routePath` on entity `Post`"
        );
    }
}
