//! Terminal output: styled messages, the progress bar, and summary views.
//!
//! Everything the user sees on screen goes through [`OutputFormatter`], so
//! the rest of the crate never styles text itself. [`TerminalProgress`]
//! adapts the progress bar to the [`Progress`] trait for the run pipeline.

use crate::report::{Progress, RunStats};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;

/// Styled terminal printing, one method per message kind.
pub struct OutputFormatter;

impl OutputFormatter {
    /// A green-checkmark success line.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// An error line, written to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// A warning line, written to stderr.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// An informational line in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// An unstyled line.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// A bold section header, preceded by a blank line.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// A line flagged as belonging to a simulated run.
    pub fn dry_run_notice(message: &str) {
        println!("{} {}", "[dry-run]".yellow().bold(), message);
    }

    /// A progress bar sized for `total` files.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    ///
    /// let bar = OutputFormatter::create_progress_bar(42);
    /// bar.inc(1);
    /// bar.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let style = ProgressStyle::with_template("[{bar:30.green/blue}] {pos}/{len} {msg}")
            .expect("progress template is valid")
            .progress_chars("#>-");
        let bar = ProgressBar::new(total);
        bar.set_style(style);
        bar
    }

    /// Per-category move counts, busiest first, with a total row.
    pub fn category_table(category_counts: &HashMap<String, usize>) {
        Self::header("BY CATEGORY");

        let mut rows: Vec<_> = category_counts.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let width = rows
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("Total".len());
        for (name, count) in &rows {
            println!("  {:<width$}  {}", name, count.to_string().green());
        }

        let total: usize = category_counts.values().sum();
        println!(
            "  {}  {}",
            format!("{:<width$}", "Total").bold(),
            total.to_string().green().bold()
        );
    }

    /// The end-of-run counters, mirroring the block written to the log.
    pub fn run_summary(stats: &RunStats) {
        Self::header("SUMMARY");

        let errors = if stats.errors == 0 {
            stats.errors.to_string().green()
        } else {
            stats.errors.to_string().red()
        };
        println!("  Files moved:   {}", stats.moved.to_string().green());
        println!("  Files skipped: {}", stats.skipped.to_string().yellow());
        println!("  Errors:        {}", errors);
        println!("  Duration:      {:.2} seconds", stats.duration_seconds());
    }
}

/// Drives the terminal progress bar from [`Progress`] callbacks.
///
/// The bar is built on discovery, once the number of files is known, and
/// cleared again on completion so summaries print on a clean line. Runs that
/// discover nothing never show a bar.
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for TerminalProgress {
    fn on_discovered(&mut self, total: u64) {
        if total > 0 {
            self.bar = Some(OutputFormatter::create_progress_bar(total));
        }
    }

    fn on_progress(&mut self, done: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(done);
        }
    }

    fn on_complete(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_progress_builds_bar_on_discovery() {
        let mut progress = TerminalProgress::new();
        assert!(progress.bar.is_none());

        progress.on_discovered(3);
        assert!(progress.bar.is_some());

        progress.on_progress(2);
        progress.on_complete();
        assert!(progress.bar.is_none());
    }

    #[test]
    fn test_terminal_progress_skips_bar_for_empty_runs() {
        let mut progress = TerminalProgress::new();
        progress.on_discovered(0);
        assert!(progress.bar.is_none());

        // Callbacks stay harmless without a bar.
        progress.on_progress(1);
        progress.on_complete();
    }
}
