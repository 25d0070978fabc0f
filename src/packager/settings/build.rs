//! Build-tool and build-configuration settings.

use std::path::PathBuf;
use std::time::Duration;

/// External tools used to produce executables.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSettings {
    /// Build driver command.
    ///
    /// Default: `scons`
    pub tool: String,

    /// Multi-architecture merge command (dual-arch path only).
    ///
    /// Default: `lipo`
    pub merge_tool: String,

    /// Build i386 + x86_64 fat executables on Intel macOS.
    ///
    /// Default: `true`
    pub dual_arch: bool,

    /// Kill an external tool after this many seconds.
    ///
    /// Default: None (wait indefinitely)
    pub timeout_secs: Option<u64>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            tool: "scons".into(),
            merge_tool: "lipo".into(),
            dual_arch: true,
            timeout_secs: None,
        }
    }
}

impl BuildSettings {
    /// Configured timeout; zero means none.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

/// How the exported build configuration is derived.
///
/// The project's real build file ends with developer-only targets after a
/// sentinel comment; distributions only get the lines before it.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfigSettings {
    /// Build file in the source root.
    ///
    /// Default: `SConstruct`
    pub source: PathBuf,

    /// Name the trimmed copy gets in the staging tree.
    ///
    /// Default: `SConstruct`
    pub staged_name: String,

    /// Prefix of the line where trimming starts.
    ///
    /// Default: `# *** Other programs`
    pub sentinel: String,
}

impl Default for BuildConfigSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("SConstruct"),
            staged_name: "SConstruct".into(),
            sentinel: "# *** Other programs".into(),
        }
    }
}
