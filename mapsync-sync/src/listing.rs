//! Shell-style globbing over a single directory level.
//!
//! `*` never matches a leading `.`, so hidden files are invisible to both
//! check and update.

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};

use crate::error::SyncError;
use crate::version::is_version_file;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Every regular file directly inside `dir`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn regular_files(dir: &Path) -> Result<Vec<PathBuf>, SyncError> {
    let mut files: Vec<PathBuf> = matching(dir, "*")?
        .into_iter()
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Every regular `*.version` file directly inside `dir`, sorted by path.
pub fn version_files(dir: &Path) -> Result<Vec<PathBuf>, SyncError> {
    Ok(regular_files(dir)?
        .into_iter()
        .filter(|p| file_name(p).is_some_and(is_version_file))
        .collect())
}

/// UTF-8 file name of `path`, if it has one.
pub fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn matching(dir: &Path, file_pattern: &str) -> Result<Vec<PathBuf>, SyncError> {
    let dir_str = dir.to_str().ok_or_else(|| SyncError::NonUtf8Path {
        path: dir.to_path_buf(),
    })?;
    let pattern = format!(
        "{}/{file_pattern}",
        Pattern::escape(dir_str.trim_end_matches('/'))
    );

    let paths = glob_with(&pattern, MATCH_OPTIONS).map_err(|source| SyncError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    // Entries that vanish or cannot be stat'ed mid-walk are skipped.
    Ok(paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::debug!("skipping unreadable entry: {err}");
                None
            }
        })
        .collect())
}
