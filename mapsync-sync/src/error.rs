//! Error types for mapsync-sync.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from check and update runs.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The staged directory was not present when the run started.
    #[error("new_dir '{}' does not exist", path.display())]
    StagedDirMissing { path: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source and destination of a copy are the same file on disk.
    #[error("{} and {} are the same file", src.display(), dst.display())]
    SameFile { src: PathBuf, dst: PathBuf },

    /// Directory paths are fed to the glob matcher and must be UTF-8.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    /// A glob pattern built from a directory path failed to compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
