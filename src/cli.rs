use clap::Parser;
use std::path::PathBuf;

use crate::rename::NamePattern;

#[derive(Parser, Debug)]
#[command(name = "photostamp")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename photos after the capture date stored in their EXIF metadata")]
pub struct Args {
    /// Folder containing the photos to rename
    #[arg(required_unless_present = "revert")]
    pub target_dir: Option<PathBuf>,

    /// Date layout used for the new file names
    #[arg(short, long, value_enum, default_value_t = NamePattern::DateTime)]
    pub pattern: NamePattern,

    /// Text placed before the date, joined with an underscore
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text placed after the date, joined with an underscore
    #[arg(long)]
    pub suffix: Option<String>,

    /// Do not write a backup ledger of the applied renames
    #[arg(long)]
    pub no_backup: bool,

    /// Preview the renames without modifying the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Apply the renames without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Revert the renames recorded in a backup ledger
    #[arg(short, long, value_name = "LEDGER_FILE", conflicts_with = "undo")]
    pub revert: Option<PathBuf>,

    /// Revert the most recent backup ledger found in the target folder
    #[arg(short, long)]
    pub undo: bool,
}
