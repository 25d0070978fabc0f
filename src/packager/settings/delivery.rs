//! Delivery destinations for finished archives.

use crate::packager::manifest::DistributionVariant;
use crate::packager::platform::DeliveryFamily;
use std::path::{Path, PathBuf};

/// Per-variant delivery directories for one platform family.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeliveryDirs {
    /// Where binary archives are copied
    pub binary: Option<PathBuf>,
    /// Where source archives are copied
    pub source: Option<PathBuf>,
}

/// Delivery directories for every (platform family, variant) pair.
///
/// Unset entries skip delivery for that pair.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeliverySettings {
    /// Linux hosts
    pub linux: DeliveryDirs,
    /// macOS hosts
    pub macos: DeliveryDirs,
}

impl DeliverySettings {
    /// Directory an archive of `variant` is delivered to on `family`.
    pub fn destination(
        &self,
        family: DeliveryFamily,
        variant: DistributionVariant,
    ) -> Option<&Path> {
        let dirs = match family {
            DeliveryFamily::Linux => &self.linux,
            DeliveryFamily::MacOs => &self.macos,
        };
        match variant {
            DistributionVariant::Binary => dirs.binary.as_deref(),
            DistributionVariant::Source => dirs.source.as_deref(),
        }
    }
}
