//! Builder for constructing Settings.

use super::{BuildConfigSettings, BuildSettings, DeliverySettings, ReleaseVersion, Settings};
use crate::packager::error::{Context, Error};
use crate::packager::manifest::Manifest;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// `product`, `version`, `source_root` and `manifest` are required; the
/// tool, build-configuration and delivery settings fall back to their
/// defaults.
#[derive(Default)]
pub struct SettingsBuilder {
    product: Option<String>,
    version: Option<ReleaseVersion>,
    source_root: Option<PathBuf>,
    manifest: Option<Manifest>,
    build: BuildSettings,
    build_config: BuildConfigSettings,
    delivery: DeliverySettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the product name.
    ///
    /// # Required
    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Sets the release version.
    ///
    /// # Required
    pub fn version(mut self, version: ReleaseVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the working tree root.
    ///
    /// # Required
    pub fn source_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the manifest.
    ///
    /// # Required
    pub fn manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Sets the build-tool settings.
    ///
    /// Default: [`BuildSettings::default`]
    pub fn build_settings(mut self, build: BuildSettings) -> Self {
        self.build = build;
        self
    }

    /// Sets the build-configuration settings.
    ///
    /// Default: [`BuildConfigSettings::default`]
    pub fn build_config(mut self, build_config: BuildConfigSettings) -> Self {
        self.build_config = build_config;
        self
    }

    /// Sets the delivery directories.
    ///
    /// Default: no delivery
    pub fn delivery(mut self, delivery: DeliverySettings) -> Self {
        self.delivery = delivery;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, the product name is
    /// not usable in a file name, or the manifest's staged build-config name
    /// disagrees with the build-configuration settings.
    pub fn build(self) -> crate::packager::Result<Settings> {
        let product = self.product.context("product is required")?;
        if product.is_empty() || product.contains(['/', '\\']) || product.contains(char::is_whitespace) {
            return Err(Error::InvalidManifest(format!(
                "product name {product:?} cannot be used in a file name"
            )));
        }

        let manifest = self.manifest.context("manifest is required")?;
        if manifest.build_config_name() != self.build_config.staged_name {
            return Err(Error::InvalidManifest(format!(
                "manifest stages the build configuration as `{}` but settings use `{}`",
                manifest.build_config_name(),
                self.build_config.staged_name
            )));
        }

        Ok(Settings::new(
            product,
            self.version.context("version is required")?,
            self.source_root.context("source_root is required")?,
            manifest,
            self.build,
            self.build_config,
            self.delivery,
        ))
    }
}
