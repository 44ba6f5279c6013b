use anyhow::{Context as _, Result};
use scaffold_codegen::{OnConflict, Options, Paths};
use scaffold_core::expand::DEFAULT_MAX_DEPTH;
use scaffold_core::{ExpandOptions, Policy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the configuration file looked up in the project root
pub const CONFIG_FILE: &str = "scaffold.toml";

/// Configuration for scaffold CLI operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root namespace of the application
    pub app_namespace: String,

    /// Directory of stubs overriding the built-in ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,

    /// Number of columns shown on index pages
    pub view_columns: usize,

    /// Deepest allowed nesting of child entities
    pub max_depth: usize,

    /// Translate view labels unless an entity says otherwise
    pub localize: bool,

    pub dry_run: bool,

    /// Treat every warning as fatal
    pub strict: bool,

    #[serde(with = "on_conflict")]
    pub on_conflict: OnConflict,

    /// Output locations, relative to the project root
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub controllers: PathBuf,
    pub models: PathBuf,
    pub migrations: PathBuf,
    pub views: PathBuf,
    pub routes: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let options = Options::default();
        Self {
            app_namespace: options.app_namespace,
            templates: None,
            view_columns: options.view_columns,
            max_depth: DEFAULT_MAX_DEPTH,
            localize: false,
            dry_run: false,
            strict: false,
            on_conflict: OnConflict::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let paths = Paths::default();
        Self {
            controllers: paths.controllers,
            models: paths.models,
            migrations: paths.migrations,
            views: paths.views,
            routes: paths.routes,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        contents
            .parse::<Config>()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Loads the configuration file, or returns the defaults if it does not
    /// exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if std::fs::exists(&path)? {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    pub fn app_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.app_namespace = namespace.into();
        self
    }

    pub fn paths(mut self, paths: PathsConfig) -> Self {
        self.paths = paths;
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

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn localize(mut self, localize: bool) -> Self {
        self.localize = localize;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = on_conflict;
        self
    }

    pub fn policy(&self) -> Policy {
        if self.strict {
            Policy::Strict
        } else {
            Policy::Lenient
        }
    }

    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            app_namespace: self.app_namespace.clone(),
            max_depth: self.max_depth,
            localize: self.localize,
            ..ExpandOptions::default()
        }
    }

    /// Generator options for a project rooted at `root`.
    pub fn codegen_options(&self, root: &Path) -> Options {
        let mut options = Options::new()
            .root(root)
            .paths(self.paths.clone().into())
            .app_namespace(&self.app_namespace)
            .view_columns(self.view_columns)
            .dry_run(self.dry_run)
            .on_conflict(self.on_conflict);
        if let Some(templates) = &self.templates {
            options = options.templates(templates);
        }
        options
    }
}

impl From<PathsConfig> for Paths {
    fn from(paths: PathsConfig) -> Paths {
        Paths {
            controllers: paths.controllers,
            models: paths.models,
            migrations: paths.migrations,
            views: paths.views,
            routes: paths.routes,
        }
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;

        if config.view_columns == 0 {
            anyhow::bail!("`view_columns` must be at least 1");
        }
        if config.max_depth == 0 {
            anyhow::bail!("`max_depth` must be at least 1");
        }

        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toml_str = toml::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", toml_str)
    }
}

mod on_conflict {
    use scaffold_codegen::OnConflict;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &OnConflict, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OnConflict, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.app_namespace, "App");
        assert_eq!(config.view_columns, 3);
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.paths.routes, Path::new("routes/web.php"));
    }

    #[test]
    fn parse_file() {
        let config: Config = r#"
            app_namespace = "Shop"
            templates = "stubs/crud"
            view_columns = 5
            localize = true
            strict = true
            on_conflict = "overwrite"

            [paths]
            routes = "routes/admin.php"
        "#
        .parse()
        .unwrap();

        assert_eq!(
            config,
            Config::new()
                .app_namespace("Shop")
                .templates("stubs/crud")
                .view_columns(5)
                .localize(true)
                .strict(true)
                .on_conflict(OnConflict::Overwrite)
                .paths(PathsConfig {
                    routes: PathBuf::from("routes/admin.php"),
                    ..PathsConfig::default()
                })
        );
        assert_eq!(config.policy(), Policy::Strict);
        assert!(config.expand_options().localize);
        assert_eq!(config.paths.controllers, Path::new("app/Http/Controllers"));
    }

    #[test]
    fn reject_bad_values() {
        assert!(r#"on_conflict = "clobber""#.parse::<Config>().is_err());
        assert!("view_columns = 0".parse::<Config>().is_err());
        assert!("max_depth = 0".parse::<Config>().is_err());
        assert!("view_columns = \"three\"".parse::<Config>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let config = Config::new().max_depth(4).on_conflict(OnConflict::Fail);
        let parsed: Config = config.to_string().parse().unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn codegen_options_follow_config() {
        let config = Config::new().app_namespace("Shop").dry_run(true).templates("stubs");
        let options = config.codegen_options(Path::new("/srv/app"));

        assert_eq!(options.root, Path::new("/srv/app"));
        assert_eq!(options.app_namespace, "Shop");
        assert_eq!(options.templates.as_deref(), Some(Path::new("stubs")));
        assert!(options.dry_run);
        assert_eq!(config.expand_options().app_namespace, "Shop");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "dry_run = true").unwrap();
        let config = Config::load_or_default(dir.path().join(CONFIG_FILE)).unwrap();
        assert!(config.dry_run);
    }
}
