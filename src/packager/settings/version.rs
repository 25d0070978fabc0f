//! Release version token.

use crate::packager::error::{Error, Result};
use std::fmt;

/// Opaque version string that names the staging tree and every archive.
///
/// Only checked for being usable inside a file name: non-empty, no path
/// separators, no whitespace.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Validates and wraps a version string.
    pub fn new(version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        if version.is_empty()
            || version.contains(['/', '\\'])
            || version.contains(char::is_whitespace)
            || version == "."
            || version == ".."
        {
            return Err(Error::InvalidManifest(format!(
                "version {version:?} cannot be used in a file name"
            )));
        }
        Ok(Self(version))
    }

    /// The version string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ReleaseVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_versions() {
        for v in ["1.1", "1.5.0-beta", "2024.10"] {
            assert_eq!(ReleaseVersion::new(v).unwrap().as_str(), v);
        }
    }

    #[test]
    fn rejects_unsafe_versions() {
        for v in ["", "1 1", "../1.1", "1/1", ".."] {
            assert!(ReleaseVersion::new(v).is_err(), "{v:?} accepted");
        }
    }
}
