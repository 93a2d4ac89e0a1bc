use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info};

use crate::history::{
    read_backup, write_backup_file, BackupRecord, HistoryError, OperationType,
};
use crate::progress::Progress;
use crate::rename::path_occupied;

#[derive(Debug, thiserror::Error)]
pub enum RevertError {
    #[error("Backup error: {0}")]
    History(#[from] HistoryError),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    RenameError {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RevertOptions {
    pub dry_run: bool,
}

/// A single revert operation
#[derive(Debug, Clone)]
pub struct RevertOperation {
    pub current_path: PathBuf,
    pub current_name: String,
    pub revert_path: PathBuf,
    pub revert_name: String,
}

/// Result of a revert operation
#[derive(Debug)]
pub struct RevertResult {
    pub operations: Vec<RevertOperation>,
    pub original_backup: PathBuf,
    pub dry_run: bool,
    pub revert_backup_path: Option<PathBuf>,
}

/// Undo the renames recorded in a backup ledger
pub fn revert_from_backup(
    backup_path: &Path,
    options: &RevertOptions,
    progress: &mut Progress,
) -> Result<RevertResult, RevertError> {
    info!("Loading backup from: {:?}", backup_path);

    let record = read_backup(backup_path)?;

    info!(
        "Backup contains {} changes from {}",
        record.changes.len(),
        record.date
    );

    progress.revert_start(record.changes.len(), &record.date.to_rfc3339());

    let target_dir = resolve_target_dir(&record, backup_path);
    let operations = prepare_revert_operations(&record, &target_dir, progress)?;

    let mut revert_backup_path = None;

    if !options.dry_run {
        execute_reverts(&operations, progress)?;

        if !operations.is_empty() {
            let revert_record = create_revert_record(&target_dir, &operations);
            let path = write_backup_file(&revert_record, &target_dir)?;
            progress.backup_written(&path);
            revert_backup_path = Some(path);
        }
    }

    progress.revert_complete(operations.len(), options.dry_run);

    Ok(RevertResult {
        operations,
        original_backup: backup_path.to_path_buf(),
        dry_run: options.dry_run,
        revert_backup_path,
    })
}

/// Ledgers live in the folder they describe; prefer that folder if the
/// recorded path no longer exists (e.g. the folder was moved).
fn resolve_target_dir(record: &BackupRecord, backup_path: &Path) -> PathBuf {
    if record.target_directory.is_dir() {
        return record.target_directory.clone();
    }

    match backup_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            debug!(
                "Recorded folder {:?} missing, using {:?}",
                record.target_directory, parent
            );
            parent.to_path_buf()
        }
        _ => record.target_directory.clone(),
    }
}

fn prepare_revert_operations(
    record: &BackupRecord,
    target_dir: &Path,
    progress: &mut Progress,
) -> Result<Vec<RevertOperation>, RevertError> {
    let mut operations = Vec::with_capacity(record.changes.len());
    let mut errors = Vec::new();

    // Undo in reverse order of application
    for (original, renamed) in record.changes.iter().rev() {
        debug!("Checking revert: {} -> {}", renamed, original);

        if let Some(name) = [original, renamed].into_iter().find(|n| !is_plain_file_name(n)) {
            errors.push(format!("Refusing ledger entry outside the folder: '{}'", name));
            continue;
        }

        let current_path = target_dir.join(renamed);
        let revert_path = target_dir.join(original);

        if !current_path.is_file() {
            errors.push(format!(
                "File not found: '{}' (expected from previous rename)",
                renamed
            ));
            continue;
        }

        if path_occupied(&revert_path) {
            errors.push(format!("Cannot revert: '{}' already exists", original));
            continue;
        }

        operations.push(RevertOperation {
            current_path,
            current_name: renamed.clone(),
            revert_path,
            revert_name: original.clone(),
        });
    }

    if !errors.is_empty() {
        error!("Revert validation failed:");
        for err in &errors {
            error!("  - {}", err);
            progress.warn(err);
        }
        return Err(RevertError::ValidationFailed(errors.join("; ")));
    }

    Ok(operations)
}

/// A bare file name: no separators, no `..`, not absolute
fn is_plain_file_name(name: &str) -> bool {
    Path::new(name).file_name() == Some(OsStr::new(name))
}

fn execute_reverts(
    operations: &[RevertOperation],
    progress: &mut Progress,
) -> Result<(), RevertError> {
    let total = operations.len();

    for (i, op) in operations.iter().enumerate() {
        progress.rename_progress(i + 1, total, &op.current_name, &op.revert_name);

        info!("Reverting: {} -> {}", op.current_name, op.revert_name);

        fs::rename(&op.current_path, &op.revert_path).map_err(|e| RevertError::RenameError {
            from: op.current_name.clone(),
            to: op.revert_name.clone(),
            source: e,
        })?;
    }

    Ok(())
}

fn create_revert_record(target_dir: &Path, operations: &[RevertOperation]) -> BackupRecord {
    let changes = operations
        .iter()
        .map(|op| (op.current_name.clone(), op.revert_name.clone()))
        .collect();

    BackupRecord::new(
        Local::now(),
        OperationType::Revert,
        target_dir.to_path_buf(),
        changes,
    )
}
