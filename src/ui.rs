//! UI module for styled terminal output.
//!
//! Decorated messages go to stderr in normal mode; verbose mode leaves
//! reporting to tracing. The confirmation prompt is shown in both.

use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};

const TAGLINE: &str = "rename photos by capture date";

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub verbose: bool,
}

impl UiConfig {
    /// Create UI config from environment and args
    pub fn new(verbose: bool) -> Self {
        Self {
            colors_enabled: should_use_colors(),
            verbose,
        }
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stderr().is_terminal()
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI with stderr output
    pub fn new(config: UiConfig) -> Self {
        Self::with_writer(config, Box::new(io::stderr()))
    }

    /// Create UI with custom writer
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    /// Print the application header
    pub fn print_header(&mut self, version: &str) {
        if self.config.verbose {
            let _ = writeln!(self.writer, "photostamp v{}", version);
            let _ = writeln!(self.writer);
            return;
        }

        let title = format!("photostamp v{}", version);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", title.bright_cyan().bold(), TAGLINE.dimmed());
            let _ = writeln!(self.writer, "{}", "─".repeat(50).dimmed());
        } else {
            let _ = writeln!(self.writer, "{} - {}", title, TAGLINE);
            let _ = writeln!(self.writer, "{}", "-".repeat(50));
        }
    }

    /// Print a section header
    pub fn section(&mut self, title: &str) {
        if self.config.verbose {
            return;
        }
        let _ = writeln!(self.writer);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", title.bold());
        } else {
            let _ = writeln!(self.writer, "{}", title);
        }
    }

    /// Print an info message
    pub fn info(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.cyan());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a success message with checkmark
    pub fn success(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    /// Print a warning message
    pub fn warning(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    /// Ask a yes/no question; anything but `y`/`yes` (or end of input) is a no
    pub fn confirm(&mut self, question: &str, input: &mut impl BufRead) -> bool {
        if self.config.colors_enabled {
            let _ = write!(self.writer, "{} {} ", question.bold(), "[y/N]".dimmed());
        } else {
            let _ = write!(self.writer, "{} [y/N] ", question);
        }
        let _ = self.writer.flush();

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(0) | Err(_) => {
                let _ = writeln!(self.writer);
                false
            }
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }

    /// Check if in verbose mode
    pub fn is_verbose(&self) -> bool {
        self.config.verbose
    }

    /// Check if colors are enabled
    pub fn is_colors_enabled(&self) -> bool {
        self.config.colors_enabled
    }
}
