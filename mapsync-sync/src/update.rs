//! Publishing staged files into the live directory.
//!
//! ## `update` sequence
//!
//! 1. Plan the next version byte for each staged sidecar (`live + 1`, wrapping).
//! 2. Create the live directory if needed.
//! 3. Copy every staged regular file over, preserving permissions and times.
//!
//! The planned bumps are only logged. Staged sidecars keep the bytes they
//! were published with.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use filetime::FileTime;

use crate::error::{io_err, SyncError};
use crate::listing::{file_name, regular_files, version_files};
use crate::version::{read_version, Version};

/// Version a staged sidecar would carry after publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBump {
    pub file_name: String,
    pub live: Version,
    pub next: Version,
}

/// Outcome of an update run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Planned (never written) version bumps.
    pub bumps: Vec<VersionBump>,
    /// Names of files copied into the live directory, in copy order.
    pub copied: Vec<String>,
}

/// Compute `live + 1` for every staged `.version` file. Writes nothing.
pub fn plan_version_bumps(staged: &Path, live: &Path) -> Result<Vec<VersionBump>, SyncError> {
    let mut bumps = Vec::new();
    for staged_path in version_files(staged)? {
        let Some(name) = file_name(&staged_path) else {
            continue;
        };
        let current = read_version(&live.join(name))?;
        let bump = VersionBump {
            file_name: name.to_owned(),
            live: current,
            next: current.next(),
        };
        tracing::debug!("{name}: live version {} -> {}", bump.live, bump.next);
        bumps.push(bump);
    }
    Ok(bumps)
}

/// Copy `src` to `dst`, overwriting, and carry over access/modification times.
///
/// Permissions are copied by [`fs::copy`]. Refuses with
/// [`SyncError::SameFile`] when `dst` is `src` itself, since opening the
/// destination truncates it before the source is read.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), SyncError> {
    let meta = fs::metadata(src).map_err(|e| io_err(src, e))?;
    if is_same_file(src, &meta, dst)? {
        return Err(SyncError::SameFile {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }
    fs::copy(src, dst).map_err(|e| io_err(dst, e))?;

    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dst, atime, mtime).map_err(|e| io_err(dst, e))?;
    Ok(())
}

/// Whether `dst` resolves to the file described by `src_meta`.
///
/// Symlinks are followed; hard links share an inode and also match.
#[cfg(unix)]
fn is_same_file(_src: &Path, src_meta: &fs::Metadata, dst: &Path) -> Result<bool, SyncError> {
    use std::os::unix::fs::MetadataExt;

    match fs::metadata(dst) {
        Ok(dst_meta) => {
            Ok(src_meta.dev() == dst_meta.dev() && src_meta.ino() == dst_meta.ino())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_err(dst, e)),
    }
}

#[cfg(not(unix))]
fn is_same_file(src: &Path, _src_meta: &fs::Metadata, dst: &Path) -> Result<bool, SyncError> {
    // No inode numbers here; compare resolved paths instead.
    let dst = match fs::canonicalize(dst) {
        Ok(p) => p,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(io_err(dst, e)),
    };
    let src = fs::canonicalize(src).map_err(|e| io_err(src, e))?;
    Ok(src == dst)
}

/// Publish every staged regular file into `live`.
pub fn update(staged: &Path, live: &Path) -> Result<UpdateReport, SyncError> {
    let mut report = UpdateReport::default();
    update_into(staged, live, &mut report)?;
    Ok(report)
}

/// Like [`update`], recording progress into `report` as it happens so the
/// caller still sees completed copies when a later one fails.
pub(crate) fn update_into(
    staged: &Path,
    live: &Path,
    report: &mut UpdateReport,
) -> Result<(), SyncError> {
    report.bumps = plan_version_bumps(staged, live)?;

    fs::create_dir_all(live).map_err(|e| io_err(live, e))?;

    for src in regular_files(staged)? {
        let Some(name) = file_name(&src) else {
            tracing::warn!("skipping non UTF-8 file name: {}", src.display());
            continue;
        };
        let dst = live.join(name);
        copy_file(&src, &dst)?;
        tracing::info!("copied: {}", dst.display());
        report.copied.push(name.to_owned());
    }

    Ok(())
}
