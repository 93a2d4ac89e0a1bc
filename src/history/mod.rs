mod reader;
mod types;
mod writer;

pub use reader::{find_backups, latest_backup, read_backup};
pub use types::*;
pub use writer::{write_backup, write_backup_file, FolderLedger, HistoryError, LedgerStore};
