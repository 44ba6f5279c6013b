mod complex;
mod config;
mod generate;
mod plan;
mod prompt;
mod report;
mod run;

pub use complex::ComplexCommand;
pub use config::*;
pub use generate::GenerateCommand;
pub use plan::PlanCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffold_codegen::OnConflict;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scaffold")]
#[command(about = "Generate CRUD controllers, models, migrations and views for Laravel")]
#[command(version)]
pub struct Cli {
    /// Project root generated files are written under
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file [default: <root>/scaffold.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show what would be generated without writing anything
    #[arg(long, global = true)]
    dry_run: bool,

    /// Fail before writing anything if the input produced any warning
    #[arg(long, global = true)]
    strict: bool,

    /// What to do with output files that already exist
    #[arg(long, global = true, value_name = "skip|overwrite|fail|prompt")]
    on_conflict: Option<OnConflict>,

    /// More logging; repeat for trace output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scaffold a single entity described by flags
    Generate(GenerateCommand),

    /// Scaffold every entity of a JSON entity document, children included
    Complex(ComplexCommand),

    /// Print the jobs a JSON entity document expands into
    Plan(PlanCommand),
}

impl Cli {
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Loads the configuration, applies the global flags and runs the
    /// command.
    pub fn run(self) -> Result<()> {
        let config = self.config()?;

        match self.command {
            Command::Generate(cmd) => cmd.run(&self.root, &config),
            Command::Complex(cmd) => cmd.run(&self.root, &config),
            Command::Plan(cmd) => cmd.run(&self.root, &config),
        }
    }

    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(self.root.join(CONFIG_FILE))?,
        };

        config.dry_run |= self.dry_run;
        config.strict |= self.strict;
        if let Some(on_conflict) = self.on_conflict {
            config.on_conflict = on_conflict;
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Installs the `tracing` subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
