use crate::{controller, migration, model, route, view};
use crate::{Artifact, Context, Options, Prompt, Templates, WriteStatus, Writer};
use scaffold_core::{Diagnostics, Entity, Error, GenerationJob, JobKind, Result, Schedule};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Runs generation jobs and writes their output.
#[derive(Debug)]
pub struct Dispatcher {
    options: Options,
    templates: Templates,
    writer: Writer,
    routes_missing_reported: bool,
}

/// Everything a run did, or would do in a dry run.
#[derive(Debug, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,

    /// Advisory findings of the run: existing classes, a missing routing
    /// file
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub target: Target,

    /// Declared name of the entity
    pub entity: String,

    /// Path relative to the project root
    pub path: PathBuf,

    pub status: WriteStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Job(JobKind),
    Route,
}

impl Dispatcher {
    pub fn new(options: Options) -> Result<Dispatcher> {
        let templates = match &options.templates {
            Some(dir) => Templates::with_dir(options.root.join(dir))?,
            None => Templates::embedded(),
        };
        let writer = Writer::new(&options.root, options.on_conflict, options.dry_run);

        Ok(Dispatcher {
            options,
            templates,
            writer,
            routes_missing_reported: false,
        })
    }

    /// Answers overwrite questions when the collision policy is `prompt`.
    pub fn prompt(&mut self, prompt: impl Prompt + 'static) {
        self.writer.set_prompt(Box::new(prompt));
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Runs every job of the schedule, latest discovered first.
    pub fn run(&mut self, schedule: &Schedule<'_>) -> Result<Report> {
        let mut report = Report::default();

        for job in schedule.dispatch_order() {
            let entity = schedule.entity(job.entity);
            self.dispatch(job, entity, &mut report).map_err(|err| {
                err.context(scaffold_core::err!("{} job for `{}`", job.kind, entity.name))
            })?;
        }

        info!(
            files = report.outcomes.len(),
            dry_run = self.options.dry_run,
            "dispatched {} jobs",
            schedule.len()
        );
        Ok(report)
    }

    fn dispatch(&mut self, job: &GenerationJob, entity: &Entity, report: &mut Report) -> Result<()> {
        let cx = Context::new(&self.options, &self.templates);

        let artifacts = match job.kind {
            JobKind::Controller => vec![controller::generate(&cx, entity)?],
            JobKind::Model => vec![model::generate(&cx, entity)?],
            JobKind::Migration => {
                let Some(prefix) = job.date_prefix.as_deref() else {
                    scaffold_core::bail!("migration job without a date prefix");
                };
                vec![migration::generate(&cx, entity, prefix)?]
            }
            JobKind::View => view::generate(&cx, entity)?,
        };

        for Artifact {
            path,
            contents,
            subject,
        } in artifacts
        {
            if matches!(job.kind, JobKind::Controller | JobKind::Model) && self.writer.exists(&path) {
                report.diagnostics.warn(
                    &entity.name,
                    Error::class_already_exists(&subject, self.writer.root().join(&path)),
                );
            }

            let status = self.writer.write(&path, &contents, &subject)?;
            debug!(kind = %job.kind, path = %path.display(), %status, "job output");

            report.outcomes.push(Outcome {
                target: Target::Job(job.kind),
                entity: entity.name.clone(),
                path,
                status,
            });
        }

        if job.kind == JobKind::Controller {
            self.register_route(entity, report)?;
        }

        Ok(())
    }

    fn register_route(&mut self, entity: &Entity, report: &mut Report) -> Result<()> {
        let cx = Context::new(&self.options, &self.templates);
        let Some(status) = route::register(&cx, &mut self.writer, entity)? else {
            return Ok(());
        };

        let routes = self.options.paths.routes.clone();
        if status == WriteStatus::Missing {
            if !self.routes_missing_reported {
                report.diagnostics.warn(
                    &entity.name,
                    Error::file_not_found(self.writer.root().join(&routes))
                        .context(scaffold_core::err!("routes were not registered")),
                );
                self.routes_missing_reported = true;
            }
            return Ok(());
        }

        report.outcomes.push(Outcome {
            target: Target::Route,
            entity: entity.name.clone(),
            path: routes,
            status,
        });
        Ok(())
    }
}

impl Report {
    /// Outcomes that changed a file on disk.
    pub fn written(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|outcome| {
            matches!(
                outcome.status,
                WriteStatus::Created | WriteStatus::Overwritten | WriteStatus::Appended
            )
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == WriteStatus::Skipped)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Job(kind) => fmt::Display::fmt(kind, f),
            Target::Route => f.write_str("route"),
        }
    }
}
