pub mod cli;
pub mod error;
pub mod history;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod progress;
pub mod rename;
pub mod revert;
pub mod scanner;
pub mod session;
pub mod ui;
pub mod worker;

pub use error::{AppError, ExitCode};
pub use metadata::{parse_exif_datetime, DateExtractor, ExifDateExtractor};
pub use progress::{NoProgress, Progress, ProgressReporter};
pub use rename::{
    commit, commit_with_ledger, format_base_name, preview, CollisionResolver, CommitReport,
    NamePattern, PhotoCandidate, PlanEntry, RenameConfig, RenameFailure, RenamePlan,
};
pub use scanner::{is_accepted_extension, scan_photos, PhotoFile, ScannerError, ACCEPTED_EXTENSIONS};
pub use session::Session;
pub use worker::{spawn_commit, CancelFlag, CommitWorker, WorkerEvent};
