use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::rename::PlanEntry;

use super::types::*;

/// Error types for backup ledger operations
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to write backup file: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize backup: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to read backup file: {0}")]
    ReadError(String),

    #[error("Backup file version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
}

/// Persist the renames applied in a commit run as a new ledger in `target_dir`
pub fn write_backup(applied: &[PlanEntry], target_dir: &Path) -> Result<PathBuf, HistoryError> {
    let changes = applied
        .iter()
        .map(|entry| (entry.source_name.clone(), entry.destination_name.clone()))
        .collect();

    let record = BackupRecord::new(
        Local::now(),
        OperationType::Rename,
        target_dir.to_path_buf(),
        changes,
    );
    write_backup_file(&record, target_dir)
}

pub fn write_backup_file(record: &BackupRecord, target_dir: &Path) -> Result<PathBuf, HistoryError> {
    let file_path = target_dir.join(record.generate_filename());

    match create_ledger(record, &file_path) {
        Err(HistoryError::WriteError(e)) if e.kind() == ErrorKind::AlreadyExists => {
            warn!("Backup file already exists: {:?}", file_path);
            let unique_path = target_dir.join(record.generate_unique_filename());
            create_ledger(record, &unique_path)
        }
        other => other,
    }
}

/// Create `path` exclusively and fill it; a partly written file is removed
fn create_ledger(record: &BackupRecord, path: &Path) -> Result<PathBuf, HistoryError> {
    let file = OpenOptions::new().write(true).create_new(true).open(path)?;

    if let Err(e) = fill(file, record) {
        let _ = fs::remove_file(path);
        return Err(e);
    }

    info!("Backup written to: {:?}", path);

    Ok(path.to_path_buf())
}

fn fill(file: File, record: &BackupRecord) -> Result<(), HistoryError> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Destination for the ledger of a commit run
pub trait LedgerStore {
    fn persist(&self, applied: &[PlanEntry], target_dir: &Path) -> Result<PathBuf, HistoryError>;
}

/// Writes ledgers as JSON files inside the renamed folder
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderLedger;

impl LedgerStore for FolderLedger {
    fn persist(&self, applied: &[PlanEntry], target_dir: &Path) -> Result<PathBuf, HistoryError> {
        write_backup(applied, target_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn applied_in(dir: &Path) -> Vec<PlanEntry> {
        vec![
            PlanEntry::new(dir.join("IMG_0001.jpg"), dir.join("2023-05-01.jpg")),
            PlanEntry::new(dir.join("IMG_0002.jpg"), dir.join("2023-05-01_1.jpg")),
        ]
    }

    #[test]
    fn test_write_backup() {
        let dir = tempdir().unwrap();

        let path = write_backup(&applied_in(dir.path()), dir.path()).unwrap();

        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(BACKUP_PREFIX));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_backup_content() {
        let dir = tempdir().unwrap();

        let path = write_backup(&applied_in(dir.path()), dir.path()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let record: BackupRecord = serde_json::from_str(&content).unwrap();

        assert_eq!(record.version, BACKUP_VERSION);
        assert_eq!(record.operation, OperationType::Rename);
        assert_eq!(record.target_directory, dir.path());
        assert_eq!(
            record.changes,
            vec![
                ("IMG_0001.jpg".to_string(), "2023-05-01.jpg".to_string()),
                ("IMG_0002.jpg".to_string(), "2023-05-01_1.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn test_pretty_printed_json() {
        let dir = tempdir().unwrap();

        let path = write_backup(&applied_in(dir.path()), dir.path()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.contains('\n'));
        assert!(content.contains("  "));
    }

    #[test]
    fn test_leaves_only_the_ledger() {
        let dir = tempdir().unwrap();

        let path = write_backup(&applied_in(dir.path()), dir.path()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(names, vec![path]);
    }

    #[test]
    fn test_taken_names_are_never_overwritten() {
        let dir = tempdir().unwrap();
        let date = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let record = BackupRecord::new(
            date,
            OperationType::Rename,
            dir.path().to_path_buf(),
            vec![("a.jpg".into(), "b.jpg".into())],
        );
        let primary = dir.path().join(record.generate_filename());
        let fallback = dir.path().join(record.generate_unique_filename());
        fs::write(&primary, "first").unwrap();
        fs::write(&fallback, "second").unwrap();

        let result = write_backup_file(&record, dir.path());

        assert!(matches!(
            result,
            Err(HistoryError::WriteError(ref e)) if e.kind() == ErrorKind::AlreadyExists
        ));
        assert_eq!(fs::read_to_string(&primary).unwrap(), "first");
        assert_eq!(fs::read_to_string(&fallback).unwrap(), "second");
    }

    #[test]
    fn test_same_second_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let date = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let first = BackupRecord::new(
            date,
            OperationType::Rename,
            dir.path().to_path_buf(),
            vec![("a.jpg".into(), "b.jpg".into())],
        );
        let second = BackupRecord::new(
            date,
            OperationType::Rename,
            dir.path().to_path_buf(),
            vec![("c.jpg".into(), "d.jpg".into())],
        );

        let p1 = write_backup_file(&first, dir.path()).unwrap();
        let p2 = write_backup_file(&second, dir.path()).unwrap();

        assert_ne!(p1, p2);
        let kept: BackupRecord = serde_json::from_str(&fs::read_to_string(&p1).unwrap()).unwrap();
        assert_eq!(kept.changes[0].0, "a.jpg");
    }

    #[test]
    fn test_write_into_missing_folder_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");

        let result = write_backup(&applied_in(&missing), &missing);
        assert!(matches!(result, Err(HistoryError::WriteError(_))));
    }
}
