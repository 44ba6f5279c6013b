use console::style;
use scaffold_codegen::{Outcome, WriteStatus};
use scaffold_core::{Diagnostic, Severity};

pub(crate) fn heading(title: &str) {
    println!();
    println!("  {}", style(title).cyan().bold().underlined());
    println!();
}

pub(crate) fn outcome(outcome: &Outcome) {
    let marker = match outcome.status {
        WriteStatus::Created | WriteStatus::Overwritten | WriteStatus::Appended => {
            style("✓").green().bold()
        }
        WriteStatus::Planned => style("→").cyan(),
        WriteStatus::Skipped | WriteStatus::Unchanged | WriteStatus::Missing => style("-").dim(),
    };

    println!(
        "  {} {:<10} {} {}",
        marker,
        outcome.target.to_string(),
        outcome.path.display(),
        style(format!("({})", outcome.status)).dim()
    );
}

pub(crate) fn diagnostics<'a>(items: impl IntoIterator<Item = &'a Diagnostic>) {
    for diagnostic in items {
        let marker = match diagnostic.severity {
            Severity::Warning => style("!").yellow().bold(),
            Severity::Error => style("✖").red().bold(),
        };
        println!("  {} {}", marker, diagnostic);
    }
}

/// Closing line of a run: counts of what happened.
pub(crate) fn summary(parts: &[(usize, &str)], warnings: usize, errors: usize) {
    let mut line: Vec<_> = parts
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, what)| format!("{count} {what}"))
        .collect();
    if line.is_empty() {
        line.push("nothing to do".to_string());
    }

    println!();
    let line = line.join(", ");
    if errors > 0 {
        println!("  {}", style(line).red().bold());
    } else {
        println!("  {}", style(line).green().bold());
    }

    if warnings > 0 || errors > 0 {
        println!(
            "  {}",
            style(format!("{warnings} warning(s), {errors} error(s)")).dim()
        );
    }
    println!();
}
