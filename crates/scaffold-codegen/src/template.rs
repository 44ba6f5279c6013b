use indexmap::IndexMap;
use scaffold_core::{Error, Result};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Placeholder values, keyed by placeholder name (without braces).
pub type Placeholders = IndexMap<&'static str, String>;

/// A stub file the generators start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stub {
    Controller,
    NormalCreateAction,
    ChildCreateAction,
    FileUpload,
    Model,
    Relationship,
    Migration,
    Index,
    Form,
    Create,
    Edit,
    Show,
    WrapField,
    FormField,
    InputField,
    PasswordField,
    RadioField,
    SelectField,
}

impl Stub {
    /// Path of the stub relative to a template directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Stub::Controller => "controller.stub",
            Stub::NormalCreateAction => "extensions/normal.controller.create.stub",
            Stub::ChildCreateAction => "extensions/child.controller.create.stub",
            Stub::FileUpload => "extensions/file-upload.stub",
            Stub::Model => "model.stub",
            Stub::Relationship => "relationship.stub",
            Stub::Migration => "migration.stub",
            Stub::Index => "index.blade.stub",
            Stub::Form => "form.blade.stub",
            Stub::Create => "create.blade.stub",
            Stub::Edit => "edit.blade.stub",
            Stub::Show => "show.blade.stub",
            Stub::WrapField => "form-fields/wrap-field.blade.stub",
            Stub::FormField => "form-fields/form-field.blade.stub",
            Stub::InputField => "form-fields/input-field.blade.stub",
            Stub::PasswordField => "form-fields/password-field.blade.stub",
            Stub::RadioField => "form-fields/radio-field.blade.stub",
            Stub::SelectField => "form-fields/select-field.blade.stub",
        }
    }

    fn embedded(self) -> &'static str {
        match self {
            Stub::Controller => include_str!("../assets/stubs/controller.stub"),
            Stub::NormalCreateAction => {
                include_str!("../assets/stubs/extensions/normal.controller.create.stub")
            }
            Stub::ChildCreateAction => {
                include_str!("../assets/stubs/extensions/child.controller.create.stub")
            }
            Stub::FileUpload => include_str!("../assets/stubs/extensions/file-upload.stub"),
            Stub::Model => include_str!("../assets/stubs/model.stub"),
            Stub::Relationship => include_str!("../assets/stubs/relationship.stub"),
            Stub::Migration => include_str!("../assets/stubs/migration.stub"),
            Stub::Index => include_str!("../assets/stubs/index.blade.stub"),
            Stub::Form => include_str!("../assets/stubs/form.blade.stub"),
            Stub::Create => include_str!("../assets/stubs/create.blade.stub"),
            Stub::Edit => include_str!("../assets/stubs/edit.blade.stub"),
            Stub::Show => include_str!("../assets/stubs/show.blade.stub"),
            Stub::WrapField => include_str!("../assets/stubs/form-fields/wrap-field.blade.stub"),
            Stub::FormField => include_str!("../assets/stubs/form-fields/form-field.blade.stub"),
            Stub::InputField => include_str!("../assets/stubs/form-fields/input-field.blade.stub"),
            Stub::PasswordField => {
                include_str!("../assets/stubs/form-fields/password-field.blade.stub")
            }
            Stub::RadioField => include_str!("../assets/stubs/form-fields/radio-field.blade.stub"),
            Stub::SelectField => {
                include_str!("../assets/stubs/form-fields/select-field.blade.stub")
            }
        }
    }
}

/// Resolves stubs, preferring files from a custom template directory over
/// the embedded defaults.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    dir: Option<PathBuf>,
}

impl Templates {
    pub fn embedded() -> Templates {
        Templates::default()
    }

    /// Uses stubs from `dir` where present. The directory itself must exist.
    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Templates> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::file_not_found(dir));
        }
        Ok(Templates {
            dir: Some(dir.to_path_buf()),
        })
    }

    pub fn load(&self, stub: Stub) -> Result<Cow<'static, str>> {
        if let Some(dir) = &self.dir {
            let path = dir.join(stub.file_name());
            if path.is_file() {
                debug!(path = %path.display(), "using custom stub");
                return Ok(Cow::Owned(std::fs::read_to_string(&path)?));
            }
        }
        Ok(Cow::Borrowed(stub.embedded()))
    }

    /// Loads `stub` and substitutes `placeholders` into it.
    pub fn render(&self, stub: Stub, placeholders: &Placeholders) -> Result<String> {
        Ok(substitute(&self.load(stub)?, placeholders))
    }
}

/// Replaces every `{{name}}` whose name is in `placeholders`, in one pass.
///
/// Values are inserted verbatim and never scanned again. Anything else
/// between double braces (Blade echoes such as `{{ $item->id }}`) is left
/// untouched.
pub fn substitute(src: &str, placeholders: &Placeholders) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let value = after.find("}}").and_then(|end| {
            let key = &after[..end];
            if is_placeholder_name(key) {
                placeholders.get(key).map(|value| (value, end))
            } else {
                None
            }
        });

        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_placeholder_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
