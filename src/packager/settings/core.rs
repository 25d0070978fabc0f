//! Core Settings struct and implementations.

use super::{BuildConfigSettings, BuildSettings, DeliverySettings, ReleaseVersion};
use crate::packager::manifest::Manifest;
use std::path::{Path, PathBuf};

/// Everything one pipeline run needs, fixed for the duration of the run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), usually from
/// the release configuration file. Passed by reference to every step; the
/// pipeline keeps no global state.
///
/// # Examples
///
/// ```no_run
/// use imfit_release::packager::{SettingsBuilder, ReleaseVersion};
///
/// # fn example(manifest: imfit_release::packager::Manifest) -> imfit_release::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .product("imfit")
///     .version(ReleaseVersion::new("1.1")?)
///     .source_root(".")
///     .manifest(manifest)
///     .build()?;
/// assert!(settings.staging_root().ends_with("imfit-1.1"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product name, first component of every derived name.
    product: String,

    /// Release version.
    version: ReleaseVersion,

    /// Working tree the manifest paths are relative to.
    ///
    /// Builds run here; the staging tree and archives are created here.
    source_root: PathBuf,

    /// Validated manifest.
    manifest: Manifest,

    /// External build tools.
    build: BuildSettings,

    /// Exported build-configuration derivation.
    build_config: BuildConfigSettings,

    /// Delivery directories.
    delivery: DeliverySettings,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product
    }

    /// Returns the release version.
    pub fn version(&self) -> &ReleaseVersion {
        &self.version
    }

    /// Returns the working tree root.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Name of the versioned distribution directory: `<product>-<version>`.
    pub fn distribution_name(&self) -> String {
        format!("{}-{}", self.product, self.version)
    }

    /// Root of the staging tree.
    pub fn staging_root(&self) -> PathBuf {
        self.source_root.join(self.distribution_name())
    }

    /// Returns the manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Returns the build-tool settings.
    pub fn build(&self) -> &BuildSettings {
        &self.build
    }

    /// Returns the build-configuration settings.
    pub fn build_config(&self) -> &BuildConfigSettings {
        &self.build_config
    }

    /// Returns the delivery settings.
    pub fn delivery(&self) -> &DeliverySettings {
        &self.delivery
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        product: String,
        version: ReleaseVersion,
        source_root: PathBuf,
        manifest: Manifest,
        build: BuildSettings,
        build_config: BuildConfigSettings,
        delivery: DeliverySettings,
    ) -> Self {
        Self {
            product,
            version,
            source_root,
            manifest,
            build,
            build_config,
            delivery,
        }
    }
}
