use clap::Parser;
use sortdir::cli::{Cli, run_cli};
use sortdir::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_cli(&cli) {
        Ok(stats) => {
            // Per-file failures do not fail the run; they are already
            // counted, logged, and echoed to stderr.
            if stats.errors > 0 {
                OutputFormatter::warning(
                    "Some files could not be moved; see the log file for details.",
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            OutputFormatter::error(&e);
            ExitCode::FAILURE
        }
    }
}
