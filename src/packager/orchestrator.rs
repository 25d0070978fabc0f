//! Pipeline orchestration.
//!
//! This module provides the [`Packager`] that sequences the pipeline steps
//! for each requested distribution variant.

use crate::packager::{
    DistributionArtifact, Result, Settings, archive,
    manifest::DistributionVariant,
    platform::{BuildDriver, HostInfo, PlatformProfile},
    staging,
};
use std::path::PathBuf;

/// Main pipeline orchestrator.
///
/// For each variant: (binary only) build the executables, stage the
/// variant, assemble its archive, and deliver it when a destination is
/// configured. Variants and steps run strictly one after another; the first
/// failure aborts the run.
///
/// # Examples
///
/// ```no_run
/// use imfit_release::packager::{DistributionVariant, Packager, Settings};
///
/// # async fn example(settings: Settings) -> imfit_release::packager::Result<()> {
/// let packager = Packager::for_host(settings)?;
/// let artifacts = packager.package(&DistributionVariant::ALL).await?;
///
/// for artifact in artifacts {
///     println!("{}: {} ({} bytes)", artifact.variant, artifact.path.display(), artifact.size);
///     println!("SHA256: {}", artifact.checksum);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
    profile: PlatformProfile,
}

impl Packager {
    /// Creates a packager for an explicit platform profile.
    pub fn new(settings: Settings, profile: PlatformProfile) -> Self {
        Self { settings, profile }
    }

    /// Creates a packager for the host this process runs on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`](crate::packager::Error::UnsupportedPlatform)
    /// if the host has no platform profile.
    pub fn for_host(settings: Settings) -> Result<Self> {
        let host = HostInfo::current();
        let profile = PlatformProfile::detect(host, settings.build().dual_arch)?;
        log::debug!("Host {}/{} uses profile {}", host.os, host.arch, profile);
        Ok(Self::new(settings, profile))
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the active platform profile.
    pub fn profile(&self) -> PlatformProfile {
        self.profile
    }

    /// Packages the given variants in order.
    pub async fn package(
        &self,
        variants: &[DistributionVariant],
    ) -> Result<Vec<DistributionArtifact>> {
        let mut artifacts = Vec::with_capacity(variants.len());
        for &variant in variants {
            artifacts.push(self.package_variant(variant).await?);
        }
        Ok(artifacts)
    }

    /// Runs every step for one variant.
    pub async fn package_variant(
        &self,
        variant: DistributionVariant,
    ) -> Result<DistributionArtifact> {
        if variant == DistributionVariant::Binary {
            self.build_binaries().await?;
        }

        let tree = staging::stage(&self.settings, variant).await?;
        log::debug!("Staging tree digest {}", tree.digest().await?);

        let mut artifact = archive::assemble(&self.settings, variant, &tree, &self.profile).await?;

        if let Some(destination) = self
            .settings
            .delivery()
            .destination(self.profile.delivery_family(), variant)
        {
            artifact.delivered_to = Some(archive::deliver(&artifact.path, destination).await?);
        } else {
            log::debug!("No delivery directory for {} on {}", variant, self.profile);
        }

        Ok(artifact)
    }

    /// Builds the binary variant's executables in the source root.
    pub async fn build_binaries(&self) -> Result<Vec<PathBuf>> {
        let targets = self.settings.manifest().executable_targets();
        let driver = BuildDriver::new(
            self.profile,
            self.settings.build(),
            self.settings.source_root(),
        )?;
        driver.build(&targets).await
    }
}
