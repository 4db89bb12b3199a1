//! Summary printing for the `run` command.
//!
//! Separate from core logic to allow i18nify to be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::{core::pipeline::RunSummary, utils::plural};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_summary(summary: &RunSummary, root: &Path, check: bool, verbose: bool) {
    print_summary_to(summary, root, check, verbose, &mut io::stdout().lock());
}

/// Print the summary to a custom writer.
pub fn print_summary_to<W: Write>(
    summary: &RunSummary,
    root: &Path,
    check: bool,
    verbose: bool,
    writer: &mut W,
) {
    let scanned = summary.files.len();
    let changed: Vec<_> = summary.changed().collect();
    let rewrites = summary.rewrites();

    // `--check` lists every offending file, a normal run only with `-v`.
    if check || verbose {
        for outcome in &changed {
            let path = outcome.path.strip_prefix(root).unwrap_or(&outcome.path);
            let _ = writeln!(
                writer,
                "  {} {} {}",
                path.display().to_string().cyan(),
                outcome.rewrites,
                plural(outcome.rewrites, "text", "texts")
            );
        }
    }

    if rewrites == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} source {} - no hardcoded text found",
                scanned,
                plural(scanned, "file", "files")
            )
            .green()
        );
        print_output(summary, root, writer);
        return;
    }

    if check {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Found {} hardcoded {} in {} of {} source {}",
                rewrites,
                plural(rewrites, "text", "texts"),
                changed.len(),
                scanned,
                plural(scanned, "file", "files")
            )
            .red()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Replaced {} hardcoded {} in {} {}",
            rewrites,
            plural(rewrites, "text", "texts"),
            changed.len(),
            plural(changed.len(), "file", "files")
        )
        .green()
    );
    print_output(summary, root, writer);
}

fn print_output<W: Write>(summary: &RunSummary, root: &Path, writer: &mut W) {
    let Some(output) = &summary.output else {
        return;
    };
    let path = output.strip_prefix(root).unwrap_or(output);
    let _ = writeln!(
        writer,
        "{} Wrote {} {} to {}",
        SUCCESS_MARK.green(),
        summary.translations,
        plural(summary.translations, "translation", "translations"),
        path.display().to_string().cyan()
    );
}
