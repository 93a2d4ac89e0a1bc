use crate::rename::{CommitReport, RenamePlan};
use crate::revert::RevertResult;
use crate::session::Session;
use std::io::{self, Write};

/// Display the preview of a session in a formatted output
pub fn display_preview(
    session: &Session,
    plan: &RenamePlan,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              PREVIEW")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Folder:   {}", session.folder.display())?;
    writeln!(writer, "Pattern:  {}", session.config.pattern.description())?;
    writeln!(writer, "Photos:   {}", plan.total)?;
    writeln!(writer)?;

    if plan.is_empty() {
        writeln!(writer, "No photos to rename.")?;
    } else {
        writeln!(writer, "Planned changes:")?;
        writeln!(writer)?;

        for (i, entry) in plan.renames().enumerate() {
            writeln!(writer, "  {}. {}", i + 1, entry.source_name)?;
            writeln!(writer, "     -> {}", entry.destination_name)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} photos would be renamed", plan.rename_count())?;

    if plan.unchanged_count() > 0 {
        writeln!(
            writer,
            "  {} photos already named correctly",
            plan.unchanged_count()
        )?;
    }

    if plan.skipped_count() > 0 {
        writeln!(
            writer,
            "  {} photos skipped (no capture date)",
            plan.skipped_count()
        )?;
    }

    Ok(())
}

/// Display the outcome of a commit run
pub fn display_commit_result(report: &CommitReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}/{} photos renamed successfully.",
        report.success_count(),
        report.total
    )?;

    if report.unchanged > 0 {
        writeln!(writer, "  {} already named correctly.", report.unchanged)?;
    }

    if report.skipped_count() > 0 {
        writeln!(
            writer,
            "  {} skipped (no capture date).",
            report.skipped_count()
        )?;
    }

    if report.has_failures() {
        writeln!(writer, "  {} failed:", report.failures.len())?;
        for failure in &report.failures {
            writeln!(
                writer,
                "    {} -> {}: {}",
                failure.source_name, failure.destination_name, failure.reason
            )?;
        }
    }

    if report.cancelled {
        writeln!(
            writer,
            "  Cancelled after {} of {} photos; completed renames were kept.",
            report.processed, report.total
        )?;
    }

    if let Some(path) = &report.backup_path {
        writeln!(writer, "Backup: {}", path.display())?;
    }

    if let Some(error) = &report.backup_error {
        writeln!(writer, "Warning: backup could not be written: {}", error)?;
    }

    Ok(())
}

/// Display the outcome of a revert
pub fn display_revert_result(result: &RevertResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Backup: {}", result.original_backup.display())?;

    if result.operations.is_empty() {
        writeln!(writer, "Nothing to revert.")?;
        return Ok(());
    }

    let verb = if result.dry_run { "Would restore" } else { "Restored" };
    for op in &result.operations {
        writeln!(writer, "  {} {} -> {}", verb, op.current_name, op.revert_name)?;
    }

    if let Some(path) = &result.revert_backup_path {
        writeln!(writer, "Revert recorded in: {}", path.display())?;
    }

    Ok(())
}
