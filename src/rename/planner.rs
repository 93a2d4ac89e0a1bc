use std::fs;
use std::io;

use tracing::{debug, info, warn};

use crate::history::{FolderLedger, LedgerStore};
use crate::progress::ProgressReporter;
use crate::session::Session;
use crate::worker::CancelFlag;

use super::collision::{path_occupied, CollisionResolver};
use super::name_builder::format_base_name;
use super::types::{CommitReport, PhotoCandidate, PlanEntry, RenameFailure, RenamePlan};

/// Per-candidate planning state shared by preview and commit.
///
/// Both modes walk the candidates in session order through the same
/// resolver, so an unchanged folder yields the same entries either way.
struct PlanningPass<'a> {
    session: &'a Session,
    resolver: CollisionResolver,
}

impl<'a> PlanningPass<'a> {
    fn new(session: &'a Session) -> Self {
        Self {
            session,
            resolver: CollisionResolver::new(),
        }
    }

    /// Compute the entry for one candidate, or `None` if it has no capture date
    fn plan(&mut self, candidate: &PhotoCandidate) -> Option<PlanEntry> {
        let captured = candidate.captured?;
        let base = format_base_name(&captured, &self.session.config);

        let destination = self.resolver.resolve(
            &self.session.folder,
            &base,
            &candidate.extension,
            &candidate.path,
        );

        let entry = PlanEntry::new(candidate.path.clone(), destination);
        debug!(
            from = %entry.source_name,
            to = %entry.destination_name,
            changes = entry.changes,
            "Planned entry"
        );
        Some(entry)
    }

    /// Keep a name vacated by an applied rename out of later entries
    fn retire_source(&mut self, entry: &PlanEntry) {
        self.resolver.reserve(&entry.source_path);
    }
}

/// Compute the full plan for a session without touching the filesystem
pub fn preview(session: &Session, reporter: &mut dyn ProgressReporter) -> RenamePlan {
    let total = session.candidates.len();
    let mut pass = PlanningPass::new(session);
    let mut plan = RenamePlan {
        total,
        ..RenamePlan::default()
    };

    info!("Previewing renames for {} photos", total);

    for (i, candidate) in session.candidates.iter().enumerate() {
        match pass.plan(candidate) {
            Some(entry) => plan.entries.push(entry),
            None => {
                debug!(name = %candidate.name, "Skipping photo without capture date");
                plan.skipped.push(candidate.name.clone());
            }
        }

        reporter.on_file_processed(i + 1, total);
    }

    info!(
        "Preview: {} renames, {} unchanged, {} skipped",
        plan.rename_count(),
        plan.unchanged_count(),
        plan.skipped_count()
    );

    plan
}

/// Plan and apply the renames for a session, one file at a time.
///
/// A failing rename is recorded and the batch moves on. The cancel flag is
/// checked before each candidate; renames already applied stay applied and
/// are still written to the backup ledger.
pub fn commit(
    session: &Session,
    reporter: &mut dyn ProgressReporter,
    cancel: &CancelFlag,
) -> CommitReport {
    commit_with_ledger(session, reporter, cancel, &FolderLedger)
}

/// [`commit`] with an explicit destination for the backup ledger
pub fn commit_with_ledger(
    session: &Session,
    reporter: &mut dyn ProgressReporter,
    cancel: &CancelFlag,
    ledger: &dyn LedgerStore,
) -> CommitReport {
    let total = session.candidates.len();
    let mut pass = PlanningPass::new(session);
    let mut report = CommitReport {
        total,
        ..CommitReport::default()
    };

    info!("Renaming {} photos in {:?}", total, session.folder);

    for (i, candidate) in session.candidates.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!("Rename cancelled after {} of {} photos", i, total);
            report.cancelled = true;
            break;
        }

        match pass.plan(candidate) {
            None => {
                debug!(name = %candidate.name, "Skipping photo without capture date");
                report.skipped.push(candidate.name.clone());
            }
            Some(entry) if !entry.changes => {
                debug!(name = %entry.source_name, "Already named correctly");
                report.unchanged += 1;
            }
            Some(entry) => apply_entry(entry, &mut pass, &mut report),
        }

        report.processed = i + 1;
        reporter.on_file_processed(i + 1, total);
    }

    if session.config.create_backup && !report.applied.is_empty() {
        match ledger.persist(&report.applied, &session.folder) {
            Ok(path) => report.backup_path = Some(path),
            Err(e) => {
                warn!("Failed to write backup ledger: {}", e);
                report.backup_error = Some(e.to_string());
            }
        }
    }

    info!(
        "Commit: {} renamed, {} unchanged, {} skipped, {} failed",
        report.success_count(),
        report.unchanged,
        report.skipped_count(),
        report.failures.len()
    );

    report
}

/// Rename one entry and record the outcome; failures never stop the batch
fn apply_entry(entry: PlanEntry, pass: &mut PlanningPass<'_>, report: &mut CommitReport) {
    match apply(&entry) {
        Ok(()) => {
            info!("Renamed: {} -> {}", entry.source_name, entry.destination_name);
            pass.retire_source(&entry);
            report.applied.push(entry);
        }
        Err(e) => {
            warn!(
                "Failed to rename {} -> {}: {}",
                entry.source_name, entry.destination_name, e
            );
            report.failures.push(RenameFailure {
                source_name: entry.source_name,
                destination_name: entry.destination_name,
                reason: e.to_string(),
            });
        }
    }
}

fn apply(entry: &PlanEntry) -> io::Result<()> {
    // fs::rename replaces an existing target on most platforms
    if path_occupied(&entry.destination_path) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target already exists",
        ));
    }

    fs::rename(&entry.source_path, &entry.destination_path)
}
