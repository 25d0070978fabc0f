//! Distribution variants and their declared composition.

use std::fmt;

/// The two release compositions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DistributionVariant {
    /// Prebuilt executables plus documentation and examples
    Binary,
    /// Everything needed to rebuild the toolset
    Source,
}

impl DistributionVariant {
    /// Pipeline order: binary first, then source.
    pub const ALL: [DistributionVariant; 2] = [Self::Binary, Self::Source];

    /// Lowercase name used in logs and configuration keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Source => "source",
        }
    }
}

impl fmt::Display for DistributionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared composition of one variant: group names in archive order.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantSpec {
    /// Names of the groups to concatenate, in order.
    pub groups: Vec<String>,

    /// Append the staged build-configuration file after the groups.
    #[serde(default)]
    pub build_config: bool,
}
