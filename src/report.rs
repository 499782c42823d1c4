//! Run statistics, the timestamped run log, and progress reporting.
//!
//! Every run appends its actions to a plain-text log file, one timestamped
//! line per event, and keeps counters for the final summary. Progress is
//! surfaced through the [`Progress`] trait so the pipeline stays independent
//! of how (or whether) it is displayed.

use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default log file name, created inside the organized directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "file_organizer_log.txt";

/// Counters and timestamps for one organization run.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Files moved (or, in dry-run mode, that would have been moved).
    pub moved: usize,
    /// Files skipped for lack of an extension.
    pub skipped: usize,
    /// Files whose move failed.
    pub errors: usize,
    /// When the run started.
    pub started_at: DateTime<Local>,
    /// When the run finished; `None` while still running.
    pub finished_at: Option<DateTime<Local>>,
}

impl RunStats {
    /// Starts the clock with all counters at zero.
    pub fn begin() -> Self {
        Self {
            moved: 0,
            skipped: 0,
            errors: 0,
            started_at: Local::now(),
            finished_at: None,
        }
    }

    /// Records one moved file.
    pub fn record_moved(&mut self) {
        self.moved += 1;
    }

    /// Records one skipped file.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Records one failed move.
    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Stops the clock.
    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    /// Elapsed seconds between start and finish, or until now for a run
    /// still in flight.
    pub fn duration_seconds(&self) -> f64 {
        let end = self.finished_at.unwrap_or_else(Local::now);
        (end - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Total files that received an outcome.
    pub fn total(&self) -> usize {
        self.moved + self.skipped + self.errors
    }
}

/// The append-only run log.
///
/// Opened once per run and held until [`finish`](Self::finish); every line is
/// prefixed with a local `[YYYY-MM-DD HH:MM:SS]` timestamp. Previous runs
/// against the same log file are preserved.
pub struct RunLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl RunLog {
    /// Opens the log file for appending, creating it if needed.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Where this log lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes one timestamped line.
    pub fn line(&mut self, message: &str) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.writer, "[{}] {}", timestamp, message)
    }

    /// Writes the end-of-run summary block.
    pub fn summary(&mut self, stats: &RunStats) -> io::Result<()> {
        self.line("Organization summary:")?;
        self.line(&format!("  Files moved: {}", stats.moved))?;
        self.line(&format!("  Files skipped: {}", stats.skipped))?;
        self.line(&format!("  Errors: {}", stats.errors))?;
        self.line(&format!(
            "  Duration: {:.2} seconds",
            stats.duration_seconds()
        ))
    }

    /// Flushes and releases the log file.
    ///
    /// Dropping a `RunLog` also flushes, but silently; calling `finish` makes
    /// a flush failure visible.
    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Presentational progress sink. The pipeline feeds it; nothing flows back.
pub trait Progress {
    /// Called once after scanning, with the number of files to process.
    fn on_discovered(&mut self, total: u64);
    /// Called after each file receives its outcome.
    fn on_progress(&mut self, done: u64);
    /// Called once after the last file.
    fn on_complete(&mut self);
}

/// A [`Progress`] sink that does nothing. Used by tests and library callers
/// that have no terminal to draw on.
#[derive(Debug, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn on_discovered(&mut self, _total: u64) {}

    fn on_progress(&mut self, _done: u64) {}

    fn on_complete(&mut self) {}
}
