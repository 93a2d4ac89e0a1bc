use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const BACKUP_VERSION: &str = "1.0";

/// File name prefix shared by every backup ledger
pub const BACKUP_PREFIX: &str = ".photostamp-backup-";

/// Persisted record of the renames applied in one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Schema version for compatibility
    pub version: String,

    /// Session timestamp (ISO-8601)
    pub date: DateTime<Local>,

    /// Type of operation performed
    pub operation: OperationType,

    /// Folder the renames were applied in
    pub target_directory: PathBuf,

    /// Tool version that created this record
    pub tool_version: String,

    /// Applied `[original, new]` name pairs, in order
    pub changes: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Rename,
    Revert,
}

impl BackupRecord {
    pub fn new(
        date: DateTime<Local>,
        operation: OperationType,
        target_directory: PathBuf,
        changes: Vec<(String, String)>,
    ) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            date,
            operation,
            target_directory,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            changes,
        }
    }

    /// Generate the ledger file name, embedding the session time to the second
    pub fn generate_filename(&self) -> String {
        format!("{}{}.json", BACKUP_PREFIX, self.date.format("%Y%m%d-%H%M%S"))
    }

    /// Fallback file name when a ledger from the same second already exists
    pub fn generate_unique_filename(&self) -> String {
        format!(
            "{}{}-{:03}.json",
            BACKUP_PREFIX,
            self.date.format("%Y%m%d-%H%M%S"),
            self.date.timestamp_subsec_millis()
        )
    }
}
