//! sortdir - organize a directory's files into category subfolders
//!
//! This library classifies the regular files of a single directory by
//! extension against an ordered category table, moves each file into a
//! matching subfolder (creating folders on first use), writes a timestamped
//! run log, and reports progress plus an end-of-run summary. A dry-run mode
//! makes the same decisions without touching the disk.

pub mod category;
pub mod cli;
pub mod config;
pub mod mover;
pub mod output;
pub mod report;
pub mod scanner;

pub use category::{
    CategoryRule, CategoryTable, Decision, ExtensionIndex, OTHER_CATEGORY, SkipReason,
};
pub use config::{CompiledFilters, ConfigError, OrganizeConfig};
pub use mover::{MoveError, MoveReceipt, Mover};
pub use report::{DEFAULT_LOG_FILE_NAME, Progress, RunLog, RunStats, SilentProgress};
pub use scanner::{FileEntry, ScanError, Scanner};

pub use cli::{Cli, RunOptions, organize_directory, run_cli};
