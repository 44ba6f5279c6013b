use crate::{run, Config};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct ComplexCommand {
    /// JSON document: an array of entity groups, each an array of entities
    file: PathBuf,
}

impl ComplexCommand {
    pub(crate) fn run(self, root: &Path, config: &Config) -> Result<()> {
        let document = run::load_document(&self.file)?;
        run::scaffold(&document, &config.expand_options(), root, config)
    }
}
