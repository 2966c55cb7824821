//! Shared entrypoint: validate, normalize, then check or update.

use std::path::Path;

use thiserror::Error;

use crate::check::check_into;
use crate::update::update_into;
use crate::{normalize_names, RenameOutcome, SyncError, UpdateReport, VersionComparison};

/// Which operation a run performs after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Report version differences without writing.
    Check,
    /// Copy every staged file into the live directory.
    Update,
}

/// Result of the step that follows normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Check(Vec<VersionComparison>),
    Update(UpdateReport),
}

impl CommandOutcome {
    fn empty(command: Command) -> Self {
        match command {
            Command::Check => Self::Check(Vec::new()),
            Command::Update => Self::Update(UpdateReport::default()),
        }
    }
}

/// Everything a run did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub renames: Vec<RenameOutcome>,
    pub outcome: CommandOutcome,
}

/// A run that stopped early, with whatever it completed before `error`.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RunFailure {
    pub report: RunReport,
    pub error: SyncError,
}

/// Run `command` against the staged and live directories.
///
/// Fails with [`SyncError::StagedDirMissing`] before touching the filesystem
/// when `staged` does not exist. `live` may be absent. On any failure the
/// renames and comparisons/copies already performed are returned in
/// [`RunFailure::report`].
pub fn run(staged: &Path, live: &Path, command: Command) -> Result<RunReport, RunFailure> {
    let mut report = RunReport {
        renames: Vec::new(),
        outcome: CommandOutcome::empty(command),
    };

    if !staged.exists() {
        return Err(RunFailure {
            report,
            error: SyncError::StagedDirMissing {
                path: staged.to_path_buf(),
            },
        });
    }

    report.renames = normalize_names(staged, live);
    let result = match &mut report.outcome {
        CommandOutcome::Check(comparisons) => check_into(staged, live, comparisons),
        CommandOutcome::Update(update) => update_into(staged, live, update),
    };

    match result {
        Ok(()) => Ok(report),
        Err(error) => Err(RunFailure { report, error }),
    }
}
