//! Dry-run comparison of staged and live version bytes.

use std::path::Path;

use crate::error::SyncError;
use crate::listing::{file_name, version_files};
use crate::version::{read_version, Version};

/// How a staged `.version` file relates to its live counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    /// No file of that name exists in the live directory.
    NewFile { staged: Version },
    /// Both sides exist and their first bytes differ.
    Changed { staged: Version, live: Version },
    /// Both sides exist with the same first byte.
    Unchanged { version: Version },
}

/// One line of the check report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionComparison {
    pub file_name: String,
    pub status: VersionStatus,
}

/// Compare every staged `*.version` file against the live directory.
///
/// Read-only. Live-only assets are not reported.
pub fn check(staged: &Path, live: &Path) -> Result<Vec<VersionComparison>, SyncError> {
    let mut report = Vec::new();
    check_into(staged, live, &mut report)?;
    Ok(report)
}

/// Like [`check`], appending each comparison to `report` as it is made.
pub(crate) fn check_into(
    staged: &Path,
    live: &Path,
    report: &mut Vec<VersionComparison>,
) -> Result<(), SyncError> {
    for staged_path in version_files(staged)? {
        let Some(name) = file_name(&staged_path) else {
            continue;
        };
        let live_path = live.join(name);

        let staged_version = read_version(&staged_path)?;
        let live_version = read_version(&live_path)?;

        let status = if !live_path.exists() {
            VersionStatus::NewFile {
                staged: staged_version,
            }
        } else if staged_version != live_version {
            VersionStatus::Changed {
                staged: staged_version,
                live: live_version,
            }
        } else {
            VersionStatus::Unchanged {
                version: staged_version,
            }
        };
        tracing::debug!("{name}: {status:?}");

        report.push(VersionComparison {
            file_name: name.to_owned(),
            status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dirs() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();
        let staged = tmp.path().join("new");
        let live = tmp.path().join("latest");
        fs::create_dir_all(&staged).unwrap();
        fs::create_dir_all(&live).unwrap();
        (tmp, staged, live)
    }

    #[test]
    fn equality_tracks_first_byte_for_every_value() {
        let (_tmp, staged, live) = dirs();
        for v in 0..=u8::MAX {
            // Trailing bytes differ on purpose; only the first byte counts.
            fs::write(staged.join("Forest.version"), [v, 1, 2]).unwrap();
            fs::write(live.join("Forest.version"), [v, 9]).unwrap();
            let same = check(&staged, &live).unwrap();
            assert_eq!(
                same[0].status,
                VersionStatus::Unchanged { version: Version(v) },
                "value {v}"
            );

            let other = v.wrapping_add(1);
            fs::write(live.join("Forest.version"), [other]).unwrap();
            let diff = check(&staged, &live).unwrap();
            assert_eq!(
                diff[0].status,
                VersionStatus::Changed {
                    staged: Version(v),
                    live: Version(other),
                },
                "value {v}"
            );
        }
    }

    #[test]
    fn missing_live_file_is_new() {
        let (_tmp, staged, live) = dirs();
        fs::write(staged.join("Forest.version"), [3]).unwrap();
        fs::write(staged.join("Forest_Map.png"), b"png").unwrap();

        let report = check(&staged, &live).unwrap();
        assert_eq!(
            report,
            vec![VersionComparison {
                file_name: "Forest.version".into(),
                status: VersionStatus::NewFile { staged: Version(3) },
            }]
        );
    }

    #[test]
    fn empty_live_file_exists_with_version_zero() {
        let (_tmp, staged, live) = dirs();
        fs::write(staged.join("Forest.version"), [0]).unwrap();
        fs::write(live.join("Forest.version"), b"").unwrap();

        let report = check(&staged, &live).unwrap();
        assert_eq!(
            report[0].status,
            VersionStatus::Unchanged { version: Version(0) }
        );
    }

    #[test]
    fn missing_live_dir_reports_everything_new() {
        let (tmp, staged, _live) = dirs();
        fs::write(staged.join("A.version"), [1]).unwrap();
        fs::write(staged.join("B.version"), [2]).unwrap();

        let report = check(&staged, &tmp.path().join("nope")).unwrap();
        assert_eq!(report.len(), 2);
        assert!(report
            .iter()
            .all(|c| matches!(c.status, VersionStatus::NewFile { .. })));
    }

    #[test]
    fn live_only_assets_are_not_reported() {
        let (_tmp, staged, live) = dirs();
        fs::write(live.join("Old.version"), [5]).unwrap();
        assert!(check(&staged, &live).unwrap().is_empty());
    }

    #[test]
    fn check_writes_nothing() {
        let (_tmp, staged, live) = dirs();
        fs::write(staged.join("Forest.version"), [3]).unwrap();
        check(&staged, &live).unwrap();
        assert!(fs::read_dir(&live).unwrap().next().is_none());
        assert_eq!(fs::read(staged.join("Forest.version")).unwrap(), vec![3]);
    }
}
