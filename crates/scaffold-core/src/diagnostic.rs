use crate::{Error, Result};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found while expanding the input, tagged with the entity path
/// it was found on (`Post > Comment`).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub subject: String,
    pub error: Error,
}

/// How diagnostics affect the rest of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    /// Warnings are reported; root entities that hit a hard error are
    /// skipped while their siblings are still generated.
    #[default]
    Lenient,

    /// Any diagnostic fails the run before a single file is written.
    Strict,
}

/// Accumulates warnings and errors for end-of-run reporting.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    pub fn warn(&mut self, subject: impl Into<String>, error: Error) {
        self.push(Severity::Warning, subject.into(), error);
    }

    pub fn error(&mut self, subject: impl Into<String>, error: Error) {
        self.push(Severity::Error, subject.into(), error);
    }

    fn push(&mut self, severity: Severity, subject: String, error: Error) {
        debug!(?severity, %subject, %error, "diagnostic");
        self.items.push(Diagnostic {
            severity,
            subject,
            error,
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Fails if the policy does not allow the recorded diagnostics.
    pub fn enforce(&self, policy: Policy) -> Result<()> {
        match policy {
            Policy::Lenient => Ok(()),
            Policy::Strict if self.is_empty() => Ok(()),
            Policy::Strict => Err(crate::err!(
                "strict mode: {} warning(s) and {} error(s) recorded",
                self.warnings().count(),
                self.errors().count()
            )),
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.error)
    }
}
