mod codes;

pub use codes::ExitCode;

use crate::history::HistoryError;
use crate::rename::{CommitReport, RenameFailure};
use crate::revert::RevertError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("{failed} of {total} renames failed")]
    RenameFailures {
        failed: usize,
        total: usize,
        failures: Vec<RenameFailure>,
    },

    #[error("Backup file error: {message}")]
    BackupError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Photos were renamed but the backup could not be written: {message}")]
    LedgerWriteError { message: String },

    #[error("No backup file found in {path}")]
    NoBackupFound { path: PathBuf },

    #[error("Revert failed: {message}")]
    RevertError { message: String },

    #[error("{0}")]
    InvalidArguments(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::RenameFailures { .. } => ExitCode::RenameError,
            AppError::BackupError { .. } => ExitCode::BackupError,
            AppError::LedgerWriteError { .. } => ExitCode::BackupError,
            AppError::NoBackupFound { .. } => ExitCode::BackupError,
            AppError::RevertError { .. } => ExitCode::RevertError,
            AppError::InvalidArguments(_) => ExitCode::InvalidArguments,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::RenameFailures {
                failed,
                total,
                failures,
            } => {
                let mut msg = format!("{} of {} photos could not be renamed:\n", failed, total);
                for failure in failures.iter().take(10) {
                    msg.push_str(&format!(
                        "  - {} -> {}: {}\n",
                        failure.source_name, failure.destination_name, failure.reason
                    ));
                }
                if failures.len() > 10 {
                    msg.push_str(&format!("  ... and {} more\n", failures.len() - 10));
                }
                msg.push_str(
                    "\nThe other photos were renamed normally. \
                     Check file permissions and run again to retry the failed ones.",
                );
                msg
            }

            AppError::BackupError { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Backup file error:\n  {}\n{}\n\
                     Check that the backup file is a readable photostamp ledger \
                     and that its folder is writable.",
                    message, path_info
                )
            }

            AppError::LedgerWriteError { message } => {
                format!(
                    "The photos were renamed, but the backup file could not be written:\n  {}\n\n\
                     This run cannot be undone with --undo. \
                     Check that the folder is writable before the next run.",
                    message
                )
            }

            AppError::NoBackupFound { path } => {
                format!(
                    "No backup file was found in:\n  {}\n\n\
                     Backups are only written when photos were renamed with backups enabled.",
                    path.display()
                )
            }

            AppError::RevertError { message } => {
                format!(
                    "Could not revert the renames:\n  {}\n\n\
                     No files were changed if validation failed. \
                     Resolve the listed conflicts and try again.",
                    message
                )
            }

            AppError::InvalidArguments(message) => message.clone(),

            AppError::Other(message) => message.clone(),
        }
    }
}

impl AppError {
    /// Error to exit with after a commit run, if any.
    ///
    /// Rename failures outrank a missing ledger; a cancelled run is not an error.
    pub fn from_commit(report: &CommitReport) -> Option<AppError> {
        if report.has_failures() {
            return Some(AppError::RenameFailures {
                failed: report.failures.len(),
                total: report.total,
                failures: report.failures.clone(),
            });
        }

        report
            .backup_error
            .as_ref()
            .map(|message| AppError::LedgerWriteError {
                message: message.clone(),
            })
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        AppError::BackupError {
            path: None,
            message: err.to_string(),
        }
    }
}

impl From<RevertError> for AppError {
    fn from(err: RevertError) -> Self {
        match err {
            RevertError::History(e) => e.into(),
            other => AppError::RevertError {
                message: other.to_string(),
            },
        }
    }
}
