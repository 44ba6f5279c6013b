use crate::writer::OnConflict;
use std::path::PathBuf;

/// Where generated files go, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub controllers: PathBuf,
    pub models: PathBuf,
    pub migrations: PathBuf,
    pub views: PathBuf,

    /// Routing file resource routes are appended to
    pub routes: PathBuf,
}

/// Settings shared by every generator.
#[derive(Debug, Clone)]
pub struct Options {
    /// Project root all output paths are resolved against
    pub root: PathBuf,

    pub paths: Paths,

    /// Root namespace of the application (`App`)
    pub app_namespace: String,

    /// Directory of stubs overriding the embedded ones
    pub templates: Option<PathBuf>,

    /// Number of columns shown on index pages
    pub view_columns: usize,

    /// Enumerate jobs without writing anything
    pub dry_run: bool,

    pub on_conflict: OnConflict,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            controllers: PathBuf::from("app/Http/Controllers"),
            models: PathBuf::from("app"),
            migrations: PathBuf::from("database/migrations"),
            views: PathBuf::from("resources/views"),
            routes: PathBuf::from("routes/web.php"),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            paths: Paths::default(),
            app_namespace: "App".to_string(),
            templates: None,
            view_columns: 3,
            dry_run: false,
            on_conflict: OnConflict::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn paths(mut self, paths: Paths) -> Self {
        self.paths = paths;
        self
    }

    pub fn app_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.app_namespace = namespace.into();
        self
    }

    pub fn templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates = Some(dir.into());
        self
    }

    pub fn view_columns(mut self, columns: usize) -> Self {
        self.view_columns = columns;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }
}
