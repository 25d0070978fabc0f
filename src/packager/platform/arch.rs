//! Host operating system and CPU architecture.

use std::fmt;

/// CPU architecture of the host.
///
/// Detected from `std::env::consts::ARCH` (e.g. `"x86_64"` → `Arch::X86_64`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// x86 / i686 (32-bit)
    X86,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
    /// ARM (32-bit)
    Arm,
    /// Anything else; carries the raw `ARCH` string
    Other(&'static str),
}

impl Arch {
    /// Maps an architecture name as reported by the Rust standard library.
    pub fn from_name(name: &'static str) -> Self {
        match name {
            "x86_64" => Self::X86_64,
            "x86" | "i386" | "i586" | "i686" => Self::X86,
            "aarch64" | "arm64" => Self::AArch64,
            "arm" => Self::Arm,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X86_64 => "x86_64",
            Self::X86 => "x86",
            Self::AArch64 => "aarch64",
            Self::Arm => "arm",
            Self::Other(name) => *name,
        })
    }
}

/// Operating-system family of the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OsFamily {
    /// Linux
    Linux,
    /// macOS
    MacOs,
    /// Anything else; carries the raw `OS` string
    Other(&'static str),
}

impl OsFamily {
    /// Maps an OS name as reported by the Rust standard library.
    pub fn from_name(name: &'static str) -> Self {
        match name {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Other(name) => *name,
        })
    }
}

/// The two host facts the pipeline consults.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HostInfo {
    /// Operating-system family
    pub os: OsFamily,
    /// Machine architecture
    pub arch: Arch,
}

impl HostInfo {
    /// Reads the host this process runs on.
    pub fn current() -> Self {
        Self {
            os: OsFamily::from_name(std::env::consts::OS),
            arch: Arch::from_name(std::env::consts::ARCH),
        }
    }
}
