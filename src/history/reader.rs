use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::*;
use super::writer::HistoryError;

// .photostamp-backup-YYYYMMDD-HHMMSS[-mmm].json
static BACKUP_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\.photostamp-backup-(\d{8}-\d{6})(?:-(\d{3}))?\.json$").unwrap()
});

/// Read and parse a backup ledger
pub fn read_backup(path: &Path) -> Result<BackupRecord, HistoryError> {
    let file = File::open(path)
        .map_err(|e| HistoryError::ReadError(format!("Cannot open file: {}", e)))?;

    let reader = BufReader::new(file);
    let record: BackupRecord = serde_json::from_reader(reader)
        .map_err(|e| HistoryError::ReadError(format!("Invalid JSON: {}", e)))?;

    if record.version != BACKUP_VERSION {
        return Err(HistoryError::VersionMismatch {
            expected: BACKUP_VERSION.to_string(),
            found: record.version,
        });
    }

    Ok(record)
}

/// List the backup ledgers in `dir`, oldest first
pub fn find_backups(dir: &Path) -> Result<Vec<PathBuf>, HistoryError> {
    let read_dir = fs::read_dir(dir)
        .map_err(|e| HistoryError::ReadError(format!("Cannot list {}: {}", dir.display(), e)))?;

    let mut found: Vec<(String, String, PathBuf)> = Vec::new();

    for entry in read_dir.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(captures) = BACKUP_NAME_REGEX.captures(&name) {
            let stamp = captures[1].to_string();
            let millis = captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            found.push((stamp, millis, entry.path()));
        }
    }

    found.sort();

    Ok(found.into_iter().map(|(_, _, path)| path).collect())
}

/// The most recent backup ledger in `dir`, if any
pub fn latest_backup(dir: &Path) -> Result<Option<PathBuf>, HistoryError> {
    Ok(find_backups(dir)?.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use tempfile::tempdir;

    fn create_test_record(dir: &Path) -> BackupRecord {
        BackupRecord::new(
            Local::now(),
            OperationType::Rename,
            dir.to_path_buf(),
            vec![("IMG_0001.jpg".to_string(), "2023-05-01.jpg".to_string())],
        )
    }

    #[test]
    fn test_read_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let content = serde_json::to_string_pretty(&create_test_record(dir.path())).unwrap();
        fs::write(&path, content).unwrap();

        let loaded = read_backup(&path).unwrap();

        assert_eq!(loaded.version, BACKUP_VERSION);
        assert_eq!(loaded.changes.len(), 1);
        assert_eq!(loaded.changes[0].1, "2023-05-01.jpg");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_backup(Path::new("/nonexistent/file.json"));
        assert!(matches!(result, Err(HistoryError::ReadError(_))));
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "not valid json {{{").unwrap();

        let result = read_backup(&path);
        assert!(matches!(result, Err(HistoryError::ReadError(_))));
    }

    #[test]
    fn test_version_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old-version.json");

        let bad_json = r#"{
            "version": "99.0",
            "date": "2026-01-01T00:00:00+00:00",
            "operation": "rename",
            "target_directory": "/photos",
            "tool_version": "0.1.0",
            "changes": []
        }"#;
        fs::write(&path, bad_json).unwrap();

        let result = read_backup(&path);
        assert!(matches!(result, Err(HistoryError::VersionMismatch { .. })));
    }

    #[test]
    fn test_find_backups_sorted() {
        let dir = tempdir().unwrap();
        for name in [
            ".photostamp-backup-20260102-090000.json",
            ".photostamp-backup-20251231-235959.json",
            ".photostamp-backup-20260102-090000-250.json",
            ".photostamp-backup-20260102-090000.json.tmp",
            "photostamp-backup-20270101-000000.json",
            "notes.json",
        ] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let found = find_backups(dir.path()).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                ".photostamp-backup-20251231-235959.json",
                ".photostamp-backup-20260102-090000.json",
                ".photostamp-backup-20260102-090000-250.json",
            ]
        );
    }

    #[test]
    fn test_latest_backup() {
        let dir = tempdir().unwrap();
        assert!(latest_backup(dir.path()).unwrap().is_none());

        fs::write(dir.path().join(".photostamp-backup-20240101-000000.json"), "{}").unwrap();
        fs::write(dir.path().join(".photostamp-backup-20250101-000000.json"), "{}").unwrap();

        let latest = latest_backup(dir.path()).unwrap().unwrap();
        assert!(latest.ends_with(".photostamp-backup-20250101-000000.json"));
    }
}
