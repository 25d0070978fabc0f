//! Platform profiles: the closed set of build/naming rules a run can use.

use super::arch::{Arch, HostInfo, OsFamily};
use crate::packager::error::{Error, Result};
use std::fmt;

/// Enable OpenMP threading in the scientific code.
const FLAG_OPENMP: &str = "--openmp";
/// Link executables statically.
const FLAG_STATIC: &str = "--static";
/// Select the legacy macOS toolchain able to target i386.
const FLAG_LEGACY_TOOLCHAIN: &str = "--old-mac";

/// Restrict a build to the 32-bit architecture.
pub const ARCH_NARROW_FLAG: &str = "--32bit";

/// Suffix of the intermediate 32-bit executable in the dual-arch path.
pub const ARCH_TAG_32: &str = "i386";
/// Suffix of the intermediate 64-bit executable in the dual-arch path.
pub const ARCH_TAG_64: &str = "x86_64";

/// Which delivery directories apply to a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DeliveryFamily {
    /// Linux hosts
    Linux,
    /// macOS hosts
    MacOs,
}

/// Build and naming rules for the host, chosen once per run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlatformProfile {
    /// One build per executable with the standard flag set.
    Standard {
        /// Host OS family
        os: OsFamily,
        /// Host architecture
        arch: Arch,
    },
    /// Intel macOS: build i386 and x86_64 separately, merge with `lipo`.
    LegacyDualArch,
}

impl PlatformProfile {
    /// Selects the profile for `host`.
    ///
    /// The dual-architecture path is taken only on x86_64 macOS and only
    /// when `dual_arch` is enabled in the build settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] for hosts that are neither
    /// Linux nor macOS, or whose architecture has no release name on that OS.
    pub fn detect(host: HostInfo, dual_arch: bool) -> Result<Self> {
        let unsupported = || Error::UnsupportedPlatform {
            os: host.os.to_string(),
            arch: host.arch.to_string(),
        };

        match (host.os, host.arch) {
            (OsFamily::MacOs, Arch::X86_64) if dual_arch => Ok(Self::LegacyDualArch),
            (OsFamily::MacOs, Arch::X86_64 | Arch::AArch64)
            | (OsFamily::Linux, Arch::X86_64 | Arch::AArch64 | Arch::X86 | Arch::Arm) => {
                Ok(Self::Standard {
                    os: host.os,
                    arch: host.arch,
                })
            }
            _ => Err(unsupported()),
        }
    }

    /// Suffix used in the binary archive name.
    pub fn archive_suffix(&self) -> &'static str {
        match self {
            Self::LegacyDualArch => "macintel",
            Self::Standard {
                os: OsFamily::MacOs,
                arch: Arch::AArch64,
            } => "macos-arm64",
            Self::Standard {
                os: OsFamily::MacOs,
                ..
            } => "macintel64",
            Self::Standard {
                arch: Arch::X86_64, ..
            } => "linux-64",
            Self::Standard {
                arch: Arch::AArch64,
                ..
            } => "linux-arm64",
            // 32-bit Linux: x86 or arm
            Self::Standard { .. } => "linux-32",
        }
    }

    /// Flags passed to every build-tool invocation, before the target name.
    pub fn build_flags(&self) -> &'static [&'static str] {
        match self {
            Self::Standard { .. } => &[FLAG_OPENMP, FLAG_STATIC],
            Self::LegacyDualArch => &[FLAG_LEGACY_TOOLCHAIN, FLAG_OPENMP, FLAG_STATIC],
        }
    }

    /// True for the two-build-and-merge path.
    pub fn is_dual_arch(&self) -> bool {
        matches!(self, Self::LegacyDualArch)
    }

    /// Delivery directories that apply on this profile.
    pub fn delivery_family(&self) -> DeliveryFamily {
        match self {
            Self::LegacyDualArch
            | Self::Standard {
                os: OsFamily::MacOs,
                ..
            } => DeliveryFamily::MacOs,
            Self::Standard { .. } => DeliveryFamily::Linux,
        }
    }
}

impl fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { os, arch } => write!(f, "{os}/{arch}"),
            Self::LegacyDualArch => f.write_str("macos/i386+x86_64"),
        }
    }
}
