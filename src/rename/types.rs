use chrono::NaiveDateTime;
use std::path::PathBuf;

use crate::scanner::PhotoFile;

/// A photo eligible for renaming, with its capture time if one could be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoCandidate {
    pub name: String,
    pub path: PathBuf,
    pub extension: String,
    pub captured: Option<NaiveDateTime>,
}

impl PhotoCandidate {
    pub fn from_file(file: PhotoFile, captured: Option<NaiveDateTime>) -> Self {
        Self {
            name: file.name,
            path: file.path,
            extension: file.extension,
            captured,
        }
    }
}

/// Mapping from one photo's current name to its final name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Full path to the photo as it is now
    pub source_path: PathBuf,
    /// Current file name
    pub source_name: String,
    /// Full path after collision resolution
    pub destination_path: PathBuf,
    /// Final file name
    pub destination_name: String,
    /// False when the photo already carries its final name
    pub changes: bool,
}

impl PlanEntry {
    pub fn new(source_path: PathBuf, destination_path: PathBuf) -> Self {
        let source_name = file_name_of(&source_path);
        let destination_name = file_name_of(&destination_path);
        let changes = source_path != destination_path;

        Self {
            source_path,
            source_name,
            destination_path,
            destination_name,
            changes,
        }
    }
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Outcome of a preview: what a commit over the same folder would do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    /// Entries for every dated photo, in processing order
    pub entries: Vec<PlanEntry>,
    /// Photos without a usable capture date
    pub skipped: Vec<String>,
    /// Number of candidates examined
    pub total: usize,
}

impl RenamePlan {
    /// Entries that would actually rename a file
    pub fn renames(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.changes)
    }

    pub fn rename_count(&self) -> usize {
        self.renames().count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.entries.len() - self.rename_count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rename_count() == 0
    }
}

/// A rename that could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameFailure {
    pub source_name: String,
    pub destination_name: String,
    pub reason: String,
}

/// Outcome of a commit run
#[derive(Debug, Clone, Default)]
pub struct CommitReport {
    /// Renames that were applied, in order
    pub applied: Vec<PlanEntry>,
    /// Dated photos that already had their final name
    pub unchanged: usize,
    /// Photos without a usable capture date
    pub skipped: Vec<String>,
    pub failures: Vec<RenameFailure>,
    /// Number of candidates in the session
    pub total: usize,
    /// Number of candidates handled before the run ended
    pub processed: usize,
    /// Whether the run stopped early on request
    pub cancelled: bool,
    pub backup_path: Option<PathBuf>,
    pub backup_error: Option<String>,
}

impl CommitReport {
    pub fn success_count(&self) -> usize {
        self.applied.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
