//! Release packaging pipeline.
//!
//! Turns the manifest into versioned source and binary archives:
//!
//! 1. [`manifest`] resolves file groups into relative paths
//! 2. [`platform`] detects the host profile and drives the build tool
//! 3. [`staging`] copies a variant's files into `<product>-<version>/`
//! 4. [`archive`] writes `<product>-<version>-<suffix>.tar.gz` and delivers it
//!
//! [`Packager`] sequences the steps; [`Settings`] carries the run's
//! configuration.

pub mod archive;
mod checksum;
mod error;
pub mod manifest;
mod orchestrator;
pub mod platform;
pub mod settings;
pub mod staging;
mod utils;

pub use checksum::{calculate_file_sha256, calculate_tree_sha256};
pub use error::{Context, Error, ErrorExt, Result};
pub use manifest::{DistributionVariant, FileGroup, GroupRole, Manifest, ResolvedFileList};
pub use orchestrator::Packager;
pub use platform::PlatformProfile;
pub use settings::{ReleaseVersion, Settings, SettingsBuilder};

use std::path::PathBuf;

/// A finished distribution archive.
#[derive(Debug, Clone)]
pub struct DistributionArtifact {
    /// Which distribution this archive holds.
    pub variant: DistributionVariant,

    /// Local archive path, in the source root.
    pub path: PathBuf,

    /// Archive size in bytes.
    pub size: u64,

    /// SHA-256 checksum of the archive, hex-encoded.
    pub checksum: String,

    /// Copy in the delivery directory, if one was configured.
    pub delivered_to: Option<PathBuf>,
}
