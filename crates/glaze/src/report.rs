//! Helpers for rendering the run report.

use std::io::Write;

use eyre::{Context, Result};
use serde::Serialize;

use crate::run::{FileReport, RunSummary};

/// Write the human-readable report.
///
/// # Errors
///
/// Returns an error when the writer fails.
pub fn write_text(writer: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    let header = if summary.write {
        "UPDATED"
    } else {
        "WOULD UPDATE"
    };
    for file in &summary.files {
        write_file(writer, header, file)?;
    }
    writeln!(
        writer,
        "\nDone. Files changed: {} | token ops: {}",
        summary.files_changed(),
        summary.token_ops()
    )
    .wrap_err("failed to write run totals")?;
    if summary.skipped > 0 {
        writeln!(writer, "Skipped {} unreadable file(s).", summary.skipped)
            .wrap_err("failed to write skipped count")?;
    }
    if !summary.write {
        writeln!(writer, "Dry run only. Pass --write to apply changes.")
            .wrap_err("failed to write dry-run hint")?;
    }
    Ok(())
}

fn write_file(writer: &mut dyn Write, header: &str, file: &FileReport) -> Result<()> {
    writeln!(writer, "\n{header}: {}", file.path.display())
        .and_then(|()| {
            file.changes
                .iter()
                .try_for_each(|change| writeln!(writer, "  - {change}"))
        })
        .wrap_err_with(|| format!("failed to write report for {}", file.path.display()))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    write: bool,
    files_changed: usize,
    token_ops: usize,
    skipped: usize,
    files: &'a [FileReport],
}

/// Write the report as a single JSON document.
///
/// # Errors
///
/// Returns an error when serialisation or the writer fails.
pub fn write_json(writer: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    let report = JsonReport {
        write: summary.write,
        files_changed: summary.files_changed(),
        token_ops: summary.token_ops(),
        skipped: summary.skipped,
        files: &summary.files,
    };
    serde_json::to_writer_pretty(&mut *writer, &report).wrap_err("failed to serialise report")?;
    writeln!(writer).wrap_err("failed to terminate JSON report")
}
