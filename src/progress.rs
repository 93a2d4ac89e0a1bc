//! Progress output for user-facing status updates.
//!
//! The rename engine only knows the [`ProgressReporter`] trait; the console
//! [`Progress`] is one implementation of it. In verbose mode its output is
//! suppressed since tracing handles everything.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Observer notified after each candidate is handled (skipped, renamed or failed).
///
/// Called synchronously from the engine's thread; implementations must return
/// quickly.
pub trait ProgressReporter {
    /// `index` is 1-based and runs up to `total`
    fn on_file_processed(&mut self, index: usize, total: usize);
}

/// Reporter that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn on_file_processed(&mut self, _index: usize, _total: usize) {}
}

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write + Send>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: false,
            colors_enabled: should_use_colors(),
        }
    }

    /// Create a progress reporter that respects UI mode
    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool, colors_enabled: bool) -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Create a silent progress reporter
    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report the start of a folder scan (same line as its completion)
    pub fn scan_start(&mut self, folder: &Path) {
        if self.silent {
            return;
        }
        let message = format!("Reading capture dates in {}...", folder.display());
        if self.colors_enabled {
            let _ = write!(self.writer, "{}", message.dimmed());
        } else {
            let _ = write!(self.writer, "{}", message);
        }
        let _ = self.writer.flush();
    }

    pub fn scan_complete(&mut self, found: usize, undated: usize) {
        if self.silent {
            return;
        }
        let message = format!(" {} photos, {} without date", found, undated);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", message.green());
        } else {
            let _ = writeln!(self.writer, "{}", message);
        }
    }

    /// Report progress on a single rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report an error during operation (non-fatal)
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    /// Report backup ledger written
    pub fn backup_written(&mut self, path: &Path) {
        if self.silent {
            return;
        }
        let message = format!("Backup saved to: {}", path.display());
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", message.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", message);
        }
    }

    /// Report starting a revert operation
    pub fn revert_start(&mut self, total: usize, from_timestamp: &str) {
        if self.silent {
            return;
        }
        let message = format!("Reverting {} photos from backup ({})", total, from_timestamp);
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", message.bold());
        } else {
            let _ = writeln!(self.writer, "{}", message);
        }
    }

    /// Report revert complete
    pub fn revert_complete(&mut self, count: usize, dry_run: bool) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if dry_run {
            let message = format!("Dry run complete. {} photos would be restored.", count);
            if self.colors_enabled {
                let _ = writeln!(self.writer, "{}", message.dimmed());
            } else {
                let _ = writeln!(self.writer, "{}", message);
            }
        } else if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} photos restored", count).green()
            );
        } else {
            let _ = writeln!(self.writer, "Revert complete. {} photos restored.", count);
        }
    }
}

impl ProgressReporter for Progress {
    fn on_file_processed(&mut self, index: usize, total: usize) {
        if self.silent {
            return;
        }
        let counter = format!("[{}/{}]", index, total);
        if self.colors_enabled {
            let _ = write!(self.writer, "\r{} photos processed", counter.cyan());
        } else {
            let _ = write!(self.writer, "\r{} photos processed", counter);
        }
        if index >= total {
            let _ = writeln!(self.writer);
        }
        let _ = self.writer.flush();
    }
}
