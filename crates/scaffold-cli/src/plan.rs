use crate::{report, run, Config};
use anyhow::Result;
use chrono::Local;
use clap::Parser;
use console::style;
use scaffold_codegen::{controller, migration, model, view, Context, Templates};
use scaffold_core::{JobKind, Schedule};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct PlanCommand {
    /// JSON document: an array of entity groups, each an array of entities
    file: PathBuf,
}

impl PlanCommand {
    pub(crate) fn run(self, root: &Path, config: &Config) -> Result<()> {
        report::heading("Plan");

        let document = run::load_document(&self.file)?;
        let expansion = run::expand_document(&document, &config.expand_options(), config)?;
        let schedule = Schedule::new(&expansion, Local::now().naive_local());

        let options = config.codegen_options(root);
        let templates = Templates::embedded();
        let cx = Context::new(&options, &templates);

        for job in schedule.dispatch_order() {
            let entity = schedule.entity(job.entity);
            let target = match job.kind {
                JobKind::Controller => controller::path(&cx, entity),
                JobKind::Model => model::path(&cx, entity),
                JobKind::Migration => {
                    migration::path(&cx, entity, job.date_prefix.as_deref().unwrap_or_default())
                }
                JobKind::View => view::dir(&cx, entity),
            };

            println!(
                "  {} {:>3}  {:<10} {:<24} {}",
                style("→").cyan(),
                job.discovery_order,
                job.kind.to_string(),
                entity.name,
                style(target.display()).dim()
            );
        }

        let (warnings, errors) = run::totals([&expansion.diagnostics]);
        report::summary(
            &[
                (schedule.len(), "job(s)"),
                (schedule.entities().len(), "entities"),
            ],
            warnings,
            errors,
        );

        if errors > 0 {
            anyhow::bail!("{errors} error(s) recorded; the affected entities are not scheduled");
        }
        Ok(())
    }
}
