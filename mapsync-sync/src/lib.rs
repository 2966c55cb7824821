//! # mapsync-sync
//!
//! Version-byte comparison and staged-to-live map publishing.
//!
//! Call [`pipeline::run`] with a [`Command`] to normalize staged filenames
//! and then either compare `.version` sidecars ([`check`]) or copy the staged
//! files into the live directory ([`update`]).

pub mod check;
pub mod error;
pub mod listing;
pub mod normalize;
pub mod pipeline;
pub mod update;
pub mod version;

pub use check::{check, VersionComparison, VersionStatus};
pub use error::SyncError;
pub use normalize::{normalize_names, RenameOutcome};
pub use pipeline::{Command, CommandOutcome, RunFailure, RunReport};
pub use update::{update, UpdateReport, VersionBump};
pub use version::{read_version, Version};
