use scaffold_core::{Error, Result};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// What to do when an output file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnConflict {
    /// Keep the existing file
    #[default]
    Skip,

    Overwrite,

    /// Abort the run
    Fail,

    /// Ask, falling back to `Skip` when nobody can answer
    Prompt,
}

/// Answers overwrite questions for [`OnConflict::Prompt`].
pub trait Prompt {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Created,
    Overwritten,

    /// The file existed and was kept
    Skipped,

    /// Dry run; nothing was touched
    Planned,

    Appended,

    /// The line was already present
    Unchanged,

    /// The file to append to does not exist
    Missing,
}

/// Writes generated files below a project root.
pub struct Writer {
    root: PathBuf,
    on_conflict: OnConflict,
    dry_run: bool,
    prompt: Option<Box<dyn Prompt>>,
}

impl Writer {
    pub fn new(root: impl Into<PathBuf>, on_conflict: OnConflict, dry_run: bool) -> Writer {
        Writer {
            root: root.into(),
            on_conflict,
            dry_run,
            prompt: None,
        }
    }

    pub fn set_prompt(&mut self, prompt: Box<dyn Prompt>) {
        self.prompt = Some(prompt);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self, relative: &Path) -> bool {
        self.root.join(relative).exists()
    }

    /// Writes `contents` to `relative` in one go, consulting the collision
    /// policy if the file exists. `subject` names what the file defines and
    /// is used in the error of [`OnConflict::Fail`].
    pub fn write(&mut self, relative: &Path, contents: &str, subject: &str) -> Result<WriteStatus> {
        let path = self.root.join(relative);
        let exists = path.exists();

        if self.dry_run {
            return Ok(WriteStatus::Planned);
        }

        if exists {
            let overwrite = match self.on_conflict {
                OnConflict::Skip => false,
                OnConflict::Overwrite => true,
                OnConflict::Fail => return Err(Error::class_already_exists(subject, &path)),
                OnConflict::Prompt => match self.prompt.as_mut() {
                    Some(prompt) => prompt.confirm_overwrite(&path)?,
                    None => false,
                },
            };

            if !overwrite {
                debug!(path = %path.display(), "kept existing file");
                return Ok(WriteStatus::Skipped);
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote file");

        Ok(if exists {
            WriteStatus::Overwritten
        } else {
            WriteStatus::Created
        })
    }

    /// Appends `line` to an existing file unless the file already contains
    /// it.
    pub fn append_line(&mut self, relative: &Path, line: &str) -> Result<WriteStatus> {
        let path = self.root.join(relative);
        if !path.is_file() {
            return Ok(WriteStatus::Missing);
        }

        let current = fs::read_to_string(&path)?;
        if current.lines().any(|existing| existing.trim() == line.trim()) {
            return Ok(WriteStatus::Unchanged);
        }

        if self.dry_run {
            return Ok(WriteStatus::Planned);
        }

        let mut file = OpenOptions::new().append(true).open(&path)?;
        if !current.is_empty() && !current.ends_with('\n') {
            writeln!(file)?;
        }
        writeln!(file, "{line}")?;
        debug!(path = %path.display(), %line, "appended line");

        Ok(WriteStatus::Appended)
    }
}

impl fmt::Debug for Writer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("root", &self.root)
            .field("on_conflict", &self.on_conflict)
            .field("dry_run", &self.dry_run)
            .field("prompt", &self.prompt.is_some())
            .finish()
    }
}

impl OnConflict {
    pub fn as_str(self) -> &'static str {
        match self {
            OnConflict::Skip => "skip",
            OnConflict::Overwrite => "overwrite",
            OnConflict::Fail => "fail",
            OnConflict::Prompt => "prompt",
        }
    }
}

impl FromStr for OnConflict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(OnConflict::Skip),
            "overwrite" => Ok(OnConflict::Overwrite),
            "fail" => Ok(OnConflict::Fail),
            "prompt" => Ok(OnConflict::Prompt),
            other => Err(format!(
                "unknown collision policy `{other}` (expected skip, overwrite, fail or prompt)"
            )),
        }
    }
}

impl fmt::Display for OnConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteStatus::Created => "created",
            WriteStatus::Overwritten => "overwritten",
            WriteStatus::Skipped => "skipped",
            WriteStatus::Planned => "planned",
            WriteStatus::Appended => "appended",
            WriteStatus::Unchanged => "unchanged",
            WriteStatus::Missing => "missing",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Answer(bool);

    impl Prompt for Answer {
        fn confirm_overwrite(&mut self, _path: &Path) -> Result<bool> {
            Ok(self.0)
        }
    }

    fn seeded() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let relative = PathBuf::from("app/Post.php");
        fs::create_dir_all(dir.path().join("app")).unwrap();
        fs::write(dir.path().join(&relative), "old").unwrap();
        (dir, relative)
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = Writer::new(dir.path(), OnConflict::Skip, false);

        let relative = Path::new("app/Http/Controllers/Admin/PostsController.php");
        let status = writer.write(relative, "<?php", "PostsController").unwrap();

        assert_eq!(status, WriteStatus::Created);
        assert_eq!(fs::read_to_string(dir.path().join(relative)).unwrap(), "<?php");
    }

    #[test]
    fn collision_policies() {
        let (dir, relative) = seeded();

        let mut writer = Writer::new(dir.path(), OnConflict::Skip, false);
        assert_eq!(writer.write(&relative, "new", "App\\Post").unwrap(), WriteStatus::Skipped);
        assert_eq!(fs::read_to_string(dir.path().join(&relative)).unwrap(), "old");

        let mut writer = Writer::new(dir.path(), OnConflict::Fail, false);
        let err = writer.write(&relative, "new", "App\\Post").unwrap_err();
        assert!(err.is_class_already_exists());

        let mut writer = Writer::new(dir.path(), OnConflict::Overwrite, false);
        assert_eq!(
            writer.write(&relative, "new", "App\\Post").unwrap(),
            WriteStatus::Overwritten
        );
        assert_eq!(fs::read_to_string(dir.path().join(&relative)).unwrap(), "new");
    }

    #[test]
    fn prompt_policy() {
        let (dir, relative) = seeded();

        let mut writer = Writer::new(dir.path(), OnConflict::Prompt, false);
        assert_eq!(writer.write(&relative, "a", "App\\Post").unwrap(), WriteStatus::Skipped);

        writer.set_prompt(Box::new(Answer(false)));
        assert_eq!(writer.write(&relative, "b", "App\\Post").unwrap(), WriteStatus::Skipped);

        writer.set_prompt(Box::new(Answer(true)));
        assert_eq!(
            writer.write(&relative, "c", "App\\Post").unwrap(),
            WriteStatus::Overwritten
        );
        assert_eq!(fs::read_to_string(dir.path().join(&relative)).unwrap(), "c");
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = Writer::new(dir.path(), OnConflict::Fail, true);

        let status = writer.write(Path::new("app/Post.php"), "<?php", "App\\Post").unwrap();
        assert_eq!(status, WriteStatus::Planned);
        assert!(!dir.path().join("app").exists());
    }

    #[test]
    fn append_line_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let routes = Path::new("web.php");
        let mut writer = Writer::new(dir.path(), OnConflict::Skip, false);

        assert_eq!(writer.append_line(routes, "x").unwrap(), WriteStatus::Missing);

        fs::write(dir.path().join(routes), "<?php").unwrap();
        let line = "Route::resource('posts', 'PostsController');";
        assert_eq!(writer.append_line(routes, line).unwrap(), WriteStatus::Appended);
        assert_eq!(writer.append_line(routes, line).unwrap(), WriteStatus::Unchanged);

        assert_eq!(
            fs::read_to_string(dir.path().join(routes)).unwrap(),
            "<?php\nRoute::resource('posts', 'PostsController');\n"
        );
    }

    #[test]
    fn parse_on_conflict() {
        assert_eq!("Overwrite".parse::<OnConflict>(), Ok(OnConflict::Overwrite));
        assert!("clobber".parse::<OnConflict>().is_err());
    }
}
