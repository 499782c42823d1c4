//! Command-line interface and run orchestration.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and path resolution
//! - Configuration loading
//! - The organization pipeline: scan, classify, move, record
//! - Terminal and log reporting

use crate::category::{Decision, ExtensionIndex};
use crate::config::{CompiledFilters, OrganizeConfig};
use crate::mover::{MoveReceipt, Mover};
use crate::output::{OutputFormatter, TerminalProgress};
use crate::report::{DEFAULT_LOG_FILE_NAME, Progress, RunLog, RunStats};
use crate::scanner::Scanner;
use clap::Parser;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Organize a directory's files into category subfolders by extension.
#[derive(Debug, Parser)]
#[command(name = "sortdir", version, about)]
pub struct Cli {
    /// Directory to organize (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Log file location (defaults to file_organizer_log.txt inside the
    /// organized directory)
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Classify and log only; move nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file with custom categories and exclusion rules
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// The directory being organized.
    pub directory: PathBuf,
    /// Where the run log is written.
    pub log_path: PathBuf,
    /// Simulate only.
    pub dry_run: bool,
}

impl RunOptions {
    /// Resolves CLI arguments into concrete paths.
    ///
    /// The directory defaults to the current working directory. The log
    /// defaults to [`DEFAULT_LOG_FILE_NAME`] inside the organized directory,
    /// so it lands next to the files it describes.
    pub fn from_cli(cli: &Cli) -> Result<Self, String> {
        let directory = match &cli.directory {
            Some(path) => path.clone(),
            None => env::current_dir()
                .map_err(|e| format!("Error resolving current directory: {}", e))?,
        };

        let log_path = cli
            .log
            .clone()
            .unwrap_or_else(|| directory.join(DEFAULT_LOG_FILE_NAME));

        Ok(Self {
            directory,
            log_path,
            dry_run: cli.dry_run,
        })
    }
}

/// Runs the CLI application: resolves paths, loads configuration, derives the
/// category index, and organizes the chosen directory.
///
/// Per-file failures are logged and counted without aborting the run. Only a
/// missing or unreadable directory, invalid configuration, and an unwritable
/// log location fail the whole run.
///
/// # Examples
///
/// ```no_run
/// use sortdir::cli::{Cli, run_cli};
/// use std::path::PathBuf;
///
/// let cli = Cli {
///     directory: Some(PathBuf::from("/path/to/downloads")),
///     log: None,
///     dry_run: false,
///     config: None,
/// };
///
/// match run_cli(&cli) {
///     Ok(stats) => println!("Moved {} files", stats.moved),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<RunStats, String> {
    let options = RunOptions::from_cli(cli)?;

    // Load configuration, derive the category index, compile the filters
    let config = OrganizeConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let index = config.category_table().index();
    let filters = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let mut progress = TerminalProgress::new();
    organize_directory(&options, &index, &filters, &mut progress)
}

/// Organizes the files of `options.directory` into category subfolders.
///
/// This is the whole pipeline, strictly sequential: scan, then for each file
/// classify, move, and record, then summarize. The scan runs before the log
/// file is created, so a run that fails outright leaves no artifacts behind.
/// In dry-run mode classification and logging happen identically but nothing
/// on disk changes, and the planned moves are listed on the terminal instead.
pub fn organize_directory(
    options: &RunOptions,
    index: &ExtensionIndex,
    filters: &CompiledFilters,
    progress: &mut dyn Progress,
) -> Result<RunStats, String> {
    if options.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "Analyzing contents of: {}",
            options.directory.display()
        ));
    } else {
        OutputFormatter::info(&format!(
            "Organizing contents of: {}",
            options.directory.display()
        ));
    }

    let mut stats = RunStats::begin();

    let scanner = Scanner::new(&options.directory, &options.log_path, filters);
    let entries = scanner.scan().map_err(|e| e.to_string())?;

    progress.on_discovered(entries.len() as u64);
    if entries.is_empty() {
        OutputFormatter::plain("No files found to organize.");
    }

    let mut log = RunLog::create(&options.log_path).map_err(|e| {
        format!(
            "Error creating log file {}: {}",
            options.log_path.display(),
            e
        )
    })?;
    log_line(
        &mut log,
        &format!(
            "Starting file organization in: {}",
            options.directory.display()
        ),
    );
    if options.dry_run {
        log_line(&mut log, "Dry-run mode: no files will be moved");
    }

    let mut mover = Mover::new(&options.directory, options.dry_run);
    let mut category_counts: HashMap<String, usize> = HashMap::new();
    let mut planned: Vec<String> = Vec::new();

    for (done, entry) in entries.iter().enumerate() {
        match index.classify(&entry.name) {
            Decision::Skip(reason) => {
                stats.record_skipped();
                log_line(
                    &mut log,
                    &format!("Skipped {}: {}", entry.name, reason.describe()),
                );
            }
            Decision::Move(category) => match mover.move_to_category(&entry.path, &category) {
                Ok(receipt) => {
                    stats.record_moved();
                    *category_counts.entry(category.clone()).or_insert(0) += 1;
                    if receipt.folder_created {
                        log_line(&mut log, &folder_message(options.dry_run, &category));
                    }
                    log_line(
                        &mut log,
                        &move_message(options.dry_run, &entry.name, &category, &receipt),
                    );
                    if options.dry_run {
                        let type_info = entry
                            .extension
                            .as_deref()
                            .map(|ext| format!(" [{}]", ext))
                            .unwrap_or_default();
                        planned.push(format!(
                            " - {}{} → {}/{}",
                            entry.name,
                            type_info,
                            category,
                            renamed_note(&receipt)
                        ));
                    }
                }
                Err(e) => {
                    stats.record_error();
                    OutputFormatter::error(&e.to_string());
                    log_line(&mut log, &format!("Error moving {}: {}", entry.name, e));
                }
            },
        }
        progress.on_progress(done as u64 + 1);
    }

    stats.finish();
    if let Err(e) = log.summary(&stats) {
        OutputFormatter::warning(&format!("Could not write log summary: {}", e));
    }
    if let Err(e) = log.finish() {
        OutputFormatter::warning(&format!("Could not flush log file: {}", e));
    }
    progress.on_complete();

    if options.dry_run && !planned.is_empty() {
        OutputFormatter::header("PLANNED MOVES");
        for line in &planned {
            OutputFormatter::plain(line);
        }
        OutputFormatter::category_table(&category_counts);
    }

    OutputFormatter::run_summary(&stats);
    if options.dry_run {
        OutputFormatter::dry_run_notice("Dry run complete. No files were modified.");
    } else {
        OutputFormatter::success("Organization complete!");
    }
    OutputFormatter::plain(&format!("Log file: {}", options.log_path.display()));

    Ok(stats)
}

/// Tolerant log write: a failing line becomes a terminal warning instead of
/// aborting the run.
fn log_line(log: &mut RunLog, message: &str) {
    if let Err(e) = log.line(message) {
        OutputFormatter::warning(&format!(
            "Could not write to log file {}: {}",
            log.path().display(),
            e
        ));
    }
}

fn folder_message(dry_run: bool, category: &str) -> String {
    if dry_run {
        format!("Dry-run: would create folder: {}", category)
    } else {
        format!("Created folder: {}", category)
    }
}

fn move_message(dry_run: bool, name: &str, category: &str, receipt: &MoveReceipt) -> String {
    let note = renamed_note(receipt);
    if dry_run {
        format!("Dry-run: would move {} → {}/{}", name, category, note)
    } else {
        format!("Moved: {} → {}/{}", name, category, note)
    }
}

/// Suffix for moves that had to dodge a same-named file at the destination.
fn renamed_note(receipt: &MoveReceipt) -> String {
    if !receipt.renamed {
        return String::new();
    }
    receipt
        .destination
        .file_name()
        .map(|n| format!(" (as {})", n.to_string_lossy()))
        .unwrap_or_default()
}
