//! Shared fixture: a miniature imfit working tree plus its release config.

#![allow(dead_code)]

use flate2::read::GzDecoder;
use imfit_release::config::ReleaseConfig;
use imfit_release::packager::Settings;
use imfit_release::packager::platform::{Arch, OsFamily};
use imfit_release::packager::PlatformProfile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SCONSTRUCT: &str = "\
env = Environment()
env.Program('imfit', ['imfit_main.cpp'])
# *** Other programs
env.Program('profilefit', ['profilefit_main.cpp'])
";

const TREE: &[(&str, &str)] = &[
    ("COPYING.txt", "GPL\n"),
    ("README.txt", "imfit readme\n"),
    ("docs/imfit_howto.pdf", "%PDF\n"),
    ("definitions.h", "#define X 1\n"),
    ("model_object.h", "class ModelObject;\n"),
    ("statistics.c", "double mean(void);\n"),
    ("model_object.cpp", "// model\n"),
    ("imfit_main.cpp", "int main() {}\n"),
    ("function_objects/func_gaussian.cpp", "// gaussian\n"),
    ("examples/config_sersic.dat", "SERSIC\n"),
    ("SConstruct", SCONSTRUCT),
];

/// Linux x86_64, the profile most tests pin so archive names are stable.
pub const LINUX_64: PlatformProfile = PlatformProfile::Standard {
    os: OsFamily::Linux,
    arch: Arch::X86_64,
};

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        for (path, contents) in TREE {
            fixture.write(path, contents);
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Release configuration text; `extra` is appended verbatim.
    pub fn config_text(&self, version: &str, extra: &str) -> String {
        format!(
            r#"
product = "imfit"
version = "{version}"

[[group]]
name = "binaries"
role = "executables"
names = "imfit makeimage"

[[group]]
name = "misc"
role = "misc"
names = """
COPYING.txt
README.txt
"""

[[group]]
name = "docs"
role = "documentation"
dir = "docs"
names = "imfit_howto.pdf"

[[group]]
name = "headers"
role = "headers"
extension = ".h"
names = "definitions model_object"

[[group]]
name = "c_sources"
role = "auxiliary-sources"
extension = ".c"
names = "statistics"

[[group]]
name = "cpp_sources"
role = "compiled-sources"
extension = ".cpp"
names = "model_object imfit_main"

[[group]]
name = "funcobj_sources"
role = "compiled-sources"
dir = "function_objects"
extension = ".cpp"
names = "func_gaussian"

[[group]]
name = "examples"
role = "examples"
dir = "examples"
names = "config_sersic.dat"

[[group]]
name = "readme_again"
role = "misc"
names = "README.txt"

[variants.binary]
groups = ["binaries", "misc", "docs", "examples"]

[variants.source]
groups = ["examples", "misc", "docs", "headers", "c_sources", "cpp_sources", "funcobj_sources", "readme_again"]
build_config = true

{extra}
"#
        )
    }

    pub fn settings(&self, version: &str) -> Settings {
        self.settings_with(version, "")
    }

    pub fn settings_with(&self, version: &str, extra: &str) -> Settings {
        ReleaseConfig::parse(&self.config_text(version, extra))
            .unwrap()
            .into_settings(self.root())
            .unwrap()
    }

    /// Writes `release.toml` into the tree and returns its path.
    pub fn write_config(&self, version: &str, extra: &str) -> PathBuf {
        let text = self.config_text(version, extra);
        self.write("release.toml", &text);
        self.path("release.toml")
    }
}

/// Entry names of a gzipped tar archive, in archive order.
pub fn archive_entries(path: &Path) -> Vec<String> {
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(path).unwrap()));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            entry
                .unwrap()
                .path()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

/// Writes an executable shell script.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Fake build tool: logs its arguments and creates a file named after the
/// last one.
#[cfg(unix)]
pub const FAKE_SCONS: &str = r#"echo "$@" >> build.log
for last; do :; done
printf 'binary %s\n' "$last" > "$last"
"#;

/// Fake merge tool: `-create A B -output OUT` concatenates A and B.
///
/// Exits 9 if OUT already exists, so a canonical executable left over from
/// the per-architecture builds fails the merge.
#[cfg(unix)]
pub const FAKE_LIPO: &str = r#"echo "$@" >> merge.log
[ -e "$5" ] && exit 9
cat "$2" "$3" > "$5"
"#;

/// Merge tool that leaves partial output behind and fails.
#[cfg(unix)]
pub const FAILING_LIPO: &str = r#"echo "$@" >> merge.log
printf partial > "$5"
exit 1
"#;
