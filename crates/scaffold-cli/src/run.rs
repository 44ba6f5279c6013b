use crate::prompt::ConfirmPrompt;
use crate::{report, Config};
use anyhow::{bail, Context as _, Result};
use chrono::Local;
use scaffold_codegen::{Dispatcher, OnConflict, WriteStatus};
use scaffold_core::{expand, Diagnostics, Document, ExpandOptions, Expansion, Schedule};
use std::path::Path;
use tracing::debug;

/// Reads a JSON entity document.
pub(crate) fn load_document(path: &Path) -> Result<Document> {
    Document::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Expands the document and prints what the expansion found. Fails if the
/// configured policy does not allow the findings.
pub(crate) fn expand_document(
    document: &Document,
    options: &ExpandOptions,
    config: &Config,
) -> Result<Expansion> {
    let expansion = expand(document, options);
    report::diagnostics(&expansion.diagnostics);
    expansion.diagnostics.enforce(config.policy())?;
    Ok(expansion)
}

/// Expands the document and writes every artifact it yields below `root`.
pub(crate) fn scaffold(
    document: &Document,
    options: &ExpandOptions,
    root: &Path,
    config: &Config,
) -> Result<()> {
    report::heading(if config.dry_run {
        "Scaffold (dry run)"
    } else {
        "Scaffold"
    });

    let expansion = expand_document(document, options, config)?;
    let schedule = Schedule::new(&expansion, Local::now().naive_local());
    debug!(jobs = schedule.len(), root = %root.display(), "dispatching");

    let mut dispatcher = Dispatcher::new(config.codegen_options(root))?;
    if config.on_conflict == OnConflict::Prompt && console::user_attended() {
        dispatcher.prompt(ConfirmPrompt::new());
    }
    let run = dispatcher.run(&schedule)?;

    for outcome in &run.outcomes {
        report::outcome(outcome);
    }
    report::diagnostics(&run.diagnostics);

    let count = |status: WriteStatus| {
        run.outcomes
            .iter()
            .filter(|outcome| outcome.status == status)
            .count()
    };
    let (warnings, errors) = totals([&expansion.diagnostics, &run.diagnostics]);
    report::summary(
        &[
            (run.written().count(), "written"),
            (count(WriteStatus::Planned), "planned"),
            (run.skipped().count(), "kept"),
        ],
        warnings,
        errors,
    );

    if errors > 0 {
        bail!("{errors} error(s) recorded; the affected entities were not generated");
    }
    Ok(())
}

pub(crate) fn totals<'a>(all: impl IntoIterator<Item = &'a Diagnostics>) -> (usize, usize) {
    all.into_iter().fold((0, 0), |(warnings, errors), diagnostics| {
        (
            warnings + diagnostics.warnings().count(),
            errors + diagnostics.errors().count(),
        )
    })
}
