//! Single-byte version markers stored in `<asset>.version` sidecars.

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::{io_err, SyncError};

/// Extension of the sidecar files that carry a map's version byte.
pub const VERSION_EXTENSION: &str = "version";

/// Opaque change counter. Only the first byte of a sidecar is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version(pub u8);

impl Version {
    /// The counter value one publish later, wrapping 255 back to 0.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returns `true` when `file_name` ends in `.version`.
pub fn is_version_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext == VERSION_EXTENSION)
}

/// Read the version byte at `path`.
///
/// A missing or empty file reads as version 0. Bytes after the first are
/// ignored.
pub fn read_version(path: &Path) -> Result<Version, SyncError> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Version::default()),
        Err(e) => return Err(io_err(path, e)),
    };

    let mut first = [0u8; 1];
    loop {
        match file.read(&mut first) {
            Ok(0) => return Ok(Version::default()),
            Ok(_) => return Ok(Version(first[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(io_err(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_zero() {
        let tmp = TempDir::new().unwrap();
        let v = read_version(&tmp.path().join("Nowhere.version")).unwrap();
        assert_eq!(v, Version(0));
    }

    #[test]
    fn empty_file_reads_as_zero() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Empty.version");
        fs::write(&path, b"").unwrap();
        assert_eq!(read_version(&path).unwrap(), Version(0));
    }

    #[rstest]
    #[case(&[7], 7)]
    #[case(&[7, 1, 2, 3], 7)]
    #[case(&[255, 0], 255)]
    #[case(&[0, 9], 0)]
    fn only_first_byte_counts(#[case] bytes: &[u8], #[case] expected: u8) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Forest.version");
        fs::write(&path, bytes).unwrap();
        assert_eq!(read_version(&path).unwrap(), Version(expected));
    }

    #[test]
    fn directory_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("odd.version");
        fs::create_dir(&dir).unwrap();
        let err = read_version(&dir).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }), "got: {err}");
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(Version(3).next(), Version(4));
        assert_eq!(Version(255).next(), Version(0));
    }

    #[rstest]
    #[case("Forest.version", true)]
    #[case("My Map.version", true)]
    #[case("Forest.png", false)]
    #[case("version", false)]
    #[case("Forest.version.bak", false)]
    fn version_file_detection(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_version_file(name), expected);
    }
}
