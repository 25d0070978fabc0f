//! Release configuration loaded from `release.toml`.
//!
//! The file declares the product, version, file groups and variant
//! compositions, plus optional build, build-configuration and delivery
//! settings. It is read and parsed exactly once per run and turned into
//! [`Settings`]; nothing downstream reads configuration from anywhere else.
//!
//! ```toml
//! product = "imfit"
//! version = "1.1"
//!
//! [[group]]
//! name = "docs"
//! role = "documentation"
//! dir = "docs"
//! names = """
//! imfit_howto.pdf
//! imfit_howto.tex
//! """
//!
//! [variants.binary]
//! groups = ["binaries", "docs"]
//!
//! [variants.source]
//! groups = ["sources", "docs"]
//! build_config = true
//! ```

use crate::error::{ReleaseError, Result};
use crate::packager::{
    FileGroup, GroupRole, Manifest, ReleaseVersion, Settings, SettingsBuilder,
    manifest::VariantSpec,
    settings::{BuildConfigSettings, BuildSettings, DeliverySettings},
};
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "release.toml";

/// On-disk layout of the release configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Product name
    pub product: String,

    /// Release version
    pub version: ReleaseVersion,

    /// Working tree, relative to the configuration file's directory.
    #[serde(default)]
    pub source_root: Option<PathBuf>,

    /// External build tools
    #[serde(default)]
    pub build: BuildSettings,

    /// Exported build-configuration derivation
    #[serde(default)]
    pub build_config: BuildConfigSettings,

    /// Delivery directories
    #[serde(default)]
    pub delivery: DeliverySettings,

    /// File groups in declaration order
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupDecl>,

    /// Variant compositions
    pub variants: VariantDecls,
}

/// One `[[group]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDecl {
    /// Unique group name
    pub name: String,
    /// Role of the group's files
    pub role: GroupRole,
    /// Base names
    pub names: NameBlock,
    /// Suffix appended to every base name
    #[serde(default)]
    pub extension: Option<String>,
    /// Target subdirectory
    #[serde(default)]
    pub dir: Option<String>,
}

/// Base names as a whitespace-separated block or an explicit list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NameBlock {
    /// `names = """ a b c """`
    Block(String),
    /// `names = ["a", "b", "c"]`
    List(Vec<String>),
}

/// The `[variants]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantDecls {
    /// Binary distribution
    pub binary: VariantSpec,
    /// Source distribution
    pub source: VariantSpec,
}

impl ReleaseConfig {
    /// Parses configuration text.
    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Validates the configuration and builds run settings.
    ///
    /// `base_dir` anchors a relative `source_root`.
    pub fn into_settings(self, base_dir: &Path) -> crate::packager::Result<Settings> {
        let groups = self
            .groups
            .into_iter()
            .map(|decl| match decl.names {
                NameBlock::Block(block) => {
                    FileGroup::new(decl.name, decl.role, block, decl.extension, decl.dir)
                }
                NameBlock::List(names) => {
                    FileGroup::from_names(decl.name, decl.role, &names, decl.extension, decl.dir)
                }
            })
            .collect::<crate::packager::Result<Vec<_>>>()?;

        let manifest = Manifest::new(
            groups,
            &self.variants.binary,
            &self.variants.source,
            self.build_config.staged_name.clone(),
        )?;

        let source_root = match &self.source_root {
            Some(root) => base_dir.join(root),
            None => base_dir.to_path_buf(),
        };

        SettingsBuilder::new()
            .product(self.product)
            .version(self.version)
            .source_root(source_root)
            .manifest(manifest)
            .build_settings(self.build)
            .build_config(self.build_config)
            .delivery(self.delivery)
            .build()
    }
}

/// Loads `release.toml` (or another configuration file) into settings.
///
/// The file is read once and parsed once. Relative paths in it are
/// resolved against the file's own directory.
pub fn load_settings(config_path: &Path) -> Result<Settings> {
    let config_error = |reason: String| ReleaseError::Config {
        path: config_path.to_path_buf(),
        reason,
    };

    let absolute = config_path
        .absolutize()
        .map_err(|e| config_error(e.to_string()))?
        .into_owned();

    let text = std::fs::read_to_string(&absolute)
        .map_err(|e| config_error(format!("cannot read: {e}")))?;

    let config = ReleaseConfig::parse(&text).map_err(|e| config_error(e.to_string()))?;

    let base_dir = absolute.parent().unwrap_or(Path::new("/"));
    let settings = config
        .into_settings(base_dir)
        .map_err(|e| config_error(e.to_string()))?;

    log::debug!(
        "Loaded {} {} with {} groups from {}",
        settings.product_name(),
        settings.version(),
        settings.manifest().groups().len(),
        absolute.display()
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::DistributionVariant;

    const MINIMAL: &str = r#"
product = "imfit"
version = "1.1"

[[group]]
name = "binaries"
role = "executables"
names = "imfit makeimage"

[[group]]
name = "cpp"
role = "compiled-sources"
extension = ".cpp"
names = ["imfit_main", "makeimage_main"]

[variants.binary]
groups = ["binaries"]

[variants.source]
groups = ["cpp"]
build_config = true
"#;

    #[test]
    fn parses_minimal_configuration() {
        let settings = ReleaseConfig::parse(MINIMAL)
            .unwrap()
            .into_settings(Path::new("/work"))
            .unwrap();

        assert_eq!(settings.product_name(), "imfit");
        assert_eq!(settings.staging_root(), Path::new("/work/imfit-1.1"));
        assert_eq!(settings.build().tool, "scons");
        assert_eq!(
            settings
                .manifest()
                .compose_variant(DistributionVariant::Source)
                .paths(),
            ["imfit_main.cpp", "makeimage_main.cpp", "SConstruct"]
        );
        assert_eq!(settings.manifest().executable_targets(), ["imfit", "makeimage"]);
    }

    #[test]
    fn source_root_is_relative_to_config() {
        let text = MINIMAL.replace("version = \"1.1\"", "version = \"1.1\"\nsource_root = \"src\"");
        let settings = ReleaseConfig::parse(&text)
            .unwrap()
            .into_settings(Path::new("/work"))
            .unwrap();
        assert_eq!(settings.source_root(), Path::new("/work/src"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = format!("{MINIMAL}\n[extra]\nkey = 1\n");
        assert!(ReleaseConfig::parse(&text).is_err());
    }

    #[test]
    fn binary_variant_without_executables_is_rejected() {
        let text = MINIMAL.replace("groups = [\"binaries\"]", "groups = []");
        let err = ReleaseConfig::parse(&text)
            .unwrap()
            .into_settings(Path::new("/work"))
            .unwrap_err();
        assert!(err.to_string().contains("executables"));
    }

    #[test]
    fn source_variant_must_carry_every_source_group() {
        let text = MINIMAL.replace("groups = [\"cpp\"]", "groups = []");
        let err = ReleaseConfig::parse(&text)
            .unwrap()
            .into_settings(Path::new("/work"))
            .unwrap_err();
        assert!(err.to_string().contains("cpp"));
    }

    #[test]
    fn invalid_version_is_rejected_at_parse() {
        let text = MINIMAL.replace("version = \"1.1\"", "version = \"1 1\"");
        assert!(ReleaseConfig::parse(&text).is_err());
    }

    #[test]
    fn shipped_release_manifest_loads() {
        let settings = ReleaseConfig::parse(include_str!("../../release.toml"))
            .unwrap()
            .into_settings(Path::new("/work"))
            .unwrap();
        let manifest = settings.manifest();
        let group_names = move |variant| {
            manifest
                .variant_groups(variant)
                .map(|g| g.name())
                .collect::<Vec<_>>()
        };

        assert_eq!(settings.distribution_name(), "imfit-1.1");
        assert_eq!(
            group_names(DistributionVariant::Binary),
            ["binaries", "misc", "docs", "examples"]
        );
        assert_eq!(
            group_names(DistributionVariant::Source),
            [
                "examples",
                "misc",
                "docs",
                "headers",
                "c_sources",
                "cpp_sources",
                "funcobj_headers",
                "funcobj_definitions",
                "funcobj_sources",
                "testing_scripts",
                "tests",
            ]
        );
        assert_eq!(manifest.executable_targets(), ["imfit", "makeimage"]);

        let binary = manifest.compose_variant(DistributionVariant::Binary);
        let source = manifest.compose_variant(DistributionVariant::Source);
        assert_eq!(binary.len(), 13);
        assert_eq!(source.len(), 171);
        assert!(source.contains("function_objects/definitions.h"));
        assert_eq!(source.paths().last().map(String::as_str), Some("SConstruct"));
    }
}
