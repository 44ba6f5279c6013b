mod error;
pub use error::{Error, IntoError};

pub mod diagnostic;
pub use diagnostic::{Diagnostic, Diagnostics, Policy, Severity};

pub mod entity;
pub use entity::{Document, Entity, ParentRef, RawEntity};

pub mod expand;
pub use expand::{expand, ExpandOptions, Expansion};

pub mod field;
pub use field::{FieldSpec, FieldType};

pub mod job;
pub use job::{EntityId, GenerationJob, JobKind, Schedule};

mod name;
pub use name::{qualify, Name};

pub mod relation;
pub use relation::{ForeignKey, ReferentialAction, RelationKind, Relationship};

/// A Result type alias that uses the scaffold [`Error`] type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
