use chrono::NaiveDateTime;
use clap::ValueEnum;

/// Date layouts available for new file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NamePattern {
    /// YYYY-MM-DD_HH-MM-SS
    #[default]
    #[value(name = "datetime")]
    DateTime,
    /// YYYYMMDD_HHMMSS
    #[value(name = "compact")]
    Compact,
    /// YYYY-MM-DD
    #[value(name = "date")]
    DateOnly,
}

impl NamePattern {
    pub fn strftime(&self) -> &'static str {
        match self {
            NamePattern::DateTime => "%Y-%m-%d_%H-%M-%S",
            NamePattern::Compact => "%Y%m%d_%H%M%S",
            NamePattern::DateOnly => "%Y-%m-%d",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NamePattern::DateTime => "YYYY-MM-DD_HH-MM-SS",
            NamePattern::Compact => "YYYYMMDD_HHMMSS",
            NamePattern::DateOnly => "YYYY-MM-DD",
        }
    }
}

/// Settings for one rename run; fixed for its whole duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameConfig {
    pub pattern: NamePattern,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub create_backup: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            pattern: NamePattern::default(),
            prefix: None,
            suffix: None,
            create_backup: true,
        }
    }
}

impl RenameConfig {
    /// Build a config, dropping empty affixes and sanitizing the rest
    pub fn new(
        pattern: NamePattern,
        prefix: Option<String>,
        suffix: Option<String>,
        create_backup: bool,
    ) -> Self {
        Self {
            pattern,
            prefix: normalize_affix(prefix),
            suffix: normalize_affix(suffix),
            create_backup,
        }
    }
}

fn normalize_affix(value: Option<String>) -> Option<String> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| sanitize_filename(&v))
}

/// Render the base name (no extension) for a capture timestamp
pub fn format_base_name(timestamp: &NaiveDateTime, config: &RenameConfig) -> String {
    let date = timestamp.format(config.pattern.strftime()).to_string();

    match (config.prefix.as_deref(), config.suffix.as_deref()) {
        (Some(prefix), Some(suffix)) => format!("{}_{}_{}", prefix, date, suffix),
        (Some(prefix), None) => format!("{}_{}", prefix, date),
        (None, Some(suffix)) => format!("{}_{}", date, suffix),
        (None, None) => date,
    }
}

/// Replace characters that are not allowed in file names
fn sanitize_filename(name: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    name.chars()
        .map(|c| if invalid_chars.contains(&c) { '_' } else { c })
        .collect()
}
