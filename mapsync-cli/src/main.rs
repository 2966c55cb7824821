//! Mapsync: publish staged map versions into a live map directory.
//!
//! # Usage
//!
//! ```text
//! mapsync <new_dir> <latest_dir> check
//! mapsync <new_dir> <latest_dir> update
//! ```

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use mapsync_sync::{pipeline, RunFailure, SyncError};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mapsync",
    version,
    about = "Map uploader utility for managing map versions",
    long_about = None,
)]
struct Cli {
    /// Temporary folder of new maps to update.
    new_dir: PathBuf,

    /// Map directory of currently available maps.
    latest_dir: PathBuf,

    /// `check` compares directories, `update` copies staged files into place.
    command: CommandArg,

    /// Emit debug logs on stderr (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,
}

/// Thin wrapper so clap can parse [`pipeline::Command`] from CLI args.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CommandArg {
    Check,
    Update,
}

impl From<CommandArg> for pipeline::Command {
    fn from(c: CommandArg) -> Self {
        match c {
            CommandArg::Check => Self::Check,
            CommandArg::Update => Self::Update,
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = pipeline::Command::from(cli.command);
    tracing::debug!(
        ?command,
        new_dir = %cli.new_dir.display(),
        latest_dir = %cli.latest_dir.display(),
        "starting run"
    );

    let run = match pipeline::run(&cli.new_dir, &cli.latest_dir, command) {
        Ok(run) => run,
        Err(RunFailure {
            error: err @ SyncError::StagedDirMissing { .. },
            ..
        }) => {
            println!("Error: {err}");
            return Ok(ExitCode::from(1));
        }
        Err(RunFailure { report, error }) => {
            // Report what already happened on disk before bailing out.
            report::print_run(&cli.new_dir, &cli.latest_dir, &report);
            return Err(error).with_context(|| match command {
                pipeline::Command::Check => format!("check failed for '{}'", cli.new_dir.display()),
                pipeline::Command::Update => format!(
                    "update from '{}' to '{}' failed",
                    cli.new_dir.display(),
                    cli.latest_dir.display()
                ),
            });
        }
    };

    report::print_run(&cli.new_dir, &cli.latest_dir, &run);
    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
