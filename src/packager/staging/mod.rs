//! Versioned staging tree.
//!
//! Staging materialises `<product>-<version>/` next to the sources and
//! copies every file of a variant into it at its manifest-relative path.
//! Directories that already exist are reused and files are overwritten, so
//! staging the same inputs twice yields an identical tree. On failure the
//! tree is left as it is; re-running is the recovery path.

mod build_config;

pub use build_config::{export_build_config, trim_build_config};

use crate::packager::{
    checksum::calculate_tree_sha256,
    error::Result,
    manifest::{DistributionVariant, resolve},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// A populated staging directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StagingTree {
    root: PathBuf,
}

impl StagingTree {
    /// Wraps an existing staging root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory, `<source_root>/<product>-<version>`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a manifest-relative path inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// SHA-256 over every file's relative path and contents.
    pub async fn digest(&self) -> Result<String> {
        calculate_tree_sha256(&self.root).await
    }
}

/// Stages every file of `variant` for the configured version.
///
/// # Errors
///
/// Returns [`Error::MissingFile`](crate::packager::Error::MissingFile) with
/// the relative path of the first manifest file that does not exist in the
/// source root. Files copied before the failure stay in place.
pub async fn stage(settings: &Settings, variant: DistributionVariant) -> Result<StagingTree> {
    let manifest = settings.manifest();
    let tree = StagingTree::new(settings.staging_root());

    log::info!(
        "Staging {} distribution in {}",
        variant,
        tree.root().display()
    );

    fs::ensure_dir(tree.root()).await?;
    for dir in manifest.subdirectories(variant) {
        fs::ensure_dir(&tree.path(dir)).await?;
    }

    let mut copied = 0usize;
    for group in manifest.variant_groups(variant) {
        for relative in &resolve(group) {
            let from = settings.source_root().join(relative);
            log::debug!("  {}", relative);
            fs::copy_file(&from, &tree.path(relative), relative).await?;
            copied += 1;
        }
    }

    if manifest.includes_build_config(variant) {
        let staged = export_build_config(settings, tree.root()).await?;
        log::debug!("  {}", staged.display());
    }

    log::info!("✓ Staged {} files for {} distribution", copied, variant);
    Ok(tree)
}
