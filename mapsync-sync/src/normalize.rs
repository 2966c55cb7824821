//! Staged filename normalization.
//!
//! Map tools often export `My_Map.version` where the live directory already
//! publishes `My Map.version`. Before comparing or copying, staged names with
//! underscores are renamed to the exact spelling of a live entry that matches
//! once underscores become spaces (case-insensitively).

use std::fs;
use std::path::Path;

use crate::listing::{file_name, regular_files};

/// Outcome of one attempted rename in the staged directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The staged file now carries the live entry's name.
    Renamed { from: String, to: String },
    /// A staged file named `to` already exists; `from` was left alone.
    Conflict { from: String, to: String },
    /// The rename itself failed; `from` was left alone.
    Failed {
        from: String,
        to: String,
        error: String,
    },
}

/// Rename staged files so they line up with live-directory spellings.
///
/// Never fails: an absent or unlistable live directory, or an unlistable
/// staged directory, simply yields no outcomes. Per-file rename errors are
/// reported as [`RenameOutcome::Failed`] and processing continues.
pub fn normalize_names(staged: &Path, live: &Path) -> Vec<RenameOutcome> {
    let Some(live_names) = list_names(live) else {
        return Vec::new();
    };
    let staged_files = match regular_files(staged) {
        Ok(files) => files,
        Err(err) => {
            tracing::debug!("cannot list {}: {err}", staged.display());
            return Vec::new();
        }
    };

    let mut outcomes = Vec::new();
    for path in staged_files {
        let Some(from) = file_name(&path).map(str::to_owned) else {
            continue;
        };
        if !from.contains('_') {
            continue;
        }
        let Some(to) = live_match(&from, &live_names) else {
            continue;
        };

        let target = staged.join(to);
        let outcome = if target.exists() {
            tracing::warn!("not renaming {from}: {} already exists", target.display());
            RenameOutcome::Conflict {
                from,
                to: to.to_owned(),
            }
        } else {
            match fs::rename(&path, &target) {
                Ok(()) => {
                    tracing::info!("renamed {from} -> {to}");
                    RenameOutcome::Renamed {
                        from,
                        to: to.to_owned(),
                    }
                }
                Err(err) => {
                    tracing::warn!("rename {from} -> {to} failed: {err}");
                    RenameOutcome::Failed {
                        from,
                        to: to.to_owned(),
                        error: err.to_string(),
                    }
                }
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}

/// The live entry matching `staged_name` with underscores read as spaces.
fn live_match<'a>(staged_name: &str, live_names: &'a [String]) -> Option<&'a str> {
    let candidate = staged_name.replace('_', " ").to_lowercase();
    live_names
        .iter()
        .find(|name| name.to_lowercase() == candidate)
        .map(String::as_str)
}

/// Sorted UTF-8 names of every entry in `dir`, or `None` if it can't be read.
fn list_names(dir: &Path) -> Option<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!("cannot list {}: {err}", dir.display());
            return None;
        }
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    Some(names)
}
