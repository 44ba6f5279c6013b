pub mod controller;

mod dispatch;
pub use dispatch::{Dispatcher, Outcome, Report, Target};

pub mod migration;
pub mod model;

mod options;
pub use options::{Options, Paths};

pub mod route;

pub mod template;
pub use template::{Placeholders, Stub, Templates};

pub mod view;

pub mod writer;
pub use writer::{OnConflict, Prompt, WriteStatus, Writer};

use std::path::{Path, PathBuf};

/// One generated file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Output path relative to the project root
    pub path: PathBuf,

    pub contents: String,

    /// Class or file the artifact defines, for messages
    pub subject: String,
}

/// What every generator reads from.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub options: &'a Options,
    pub templates: &'a Templates,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a Options, templates: &'a Templates) -> Context<'a> {
        Context { options, templates }
    }
}

/// `base/Admin/PostsController.php` for `Admin\PostsController`.
pub(crate) fn class_path(base: &Path, class: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    let mut segments = class.split('\\').filter(|s| !s.is_empty()).peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!("{segment}.php"));
        }
    }
    path
}

/// Last segment of a namespaced class name.
pub(crate) fn class_basename(class: &str) -> &str {
    class.rsplit('\\').next().unwrap_or(class)
}

/// Renders a single-quoted PHP string literal.
pub(crate) fn php_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if matches!(ch, '\\' | '\'') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Renders strings as a PHP array literal: `['a', 'b']`.
pub(crate) fn php_array<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<_> = items.iter().map(|item| php_string(item.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_paths() {
        assert_eq!(
            class_path(Path::new("app/Http/Controllers"), "Admin\\PostsController"),
            Path::new("app/Http/Controllers/Admin/PostsController.php")
        );
        assert_eq!(class_path(Path::new("app"), "Post"), Path::new("app/Post.php"));
    }

    #[test]
    fn php_arrays() {
        assert_eq!(php_array(&["title", "body"]), "['title', 'body']");
        assert_eq!(php_array::<&str>(&[]), "[]");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(php_string("O'Neil"), r"'O\'Neil'");
        assert_eq!(php_string(r"C:\tmp"), r"'C:\\tmp'");
        assert_eq!(php_array(&["it's", "plain"]), r"['it\'s', 'plain']");
    }
}
