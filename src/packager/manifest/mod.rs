//! Declarative manifest of what goes into each distribution.
//!
//! A [`Manifest`] is an ordered registry of [`FileGroup`]s plus the
//! composition of the two [`DistributionVariant`]s. It is built once from the
//! release configuration, validated, and never mutated afterwards.
//!
//! - [`group`] - file groups and their roles
//! - [`resolve`] - expansion of groups and variants into relative paths
//! - [`variant`] - distribution variants

mod group;
mod resolve;
mod variant;

pub use group::{FileGroup, GroupRole};
pub use resolve::{ResolvedFileList, resolve};
pub use variant::{DistributionVariant, VariantSpec};

use crate::packager::error::{Error, Result};
use std::collections::HashMap;

/// Validated manifest.
#[derive(Clone, Debug)]
pub struct Manifest {
    groups: Vec<FileGroup>,
    binary: Composition,
    source: Composition,
    build_config_name: String,
}

#[derive(Clone, Debug)]
struct Composition {
    groups: Vec<usize>,
    build_config: bool,
}

impl Manifest {
    /// Builds a manifest from declared groups and variant compositions.
    ///
    /// `build_config_name` is the file name under which the trimmed build
    /// configuration is staged; it is appended to a variant's composition
    /// when that variant sets [`VariantSpec::build_config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidManifest`] when group names collide, a variant
    /// references an unknown group, or a variant violates its role rules:
    /// the binary variant needs an executables group and no compiled
    /// sources; the source variant needs every compiled and auxiliary
    /// source group and no executables.
    pub fn new(
        groups: Vec<FileGroup>,
        binary: &VariantSpec,
        source: &VariantSpec,
        build_config_name: impl Into<String>,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(groups.len());
        for (i, group) in groups.iter().enumerate() {
            if index.insert(group.name().to_string(), i).is_some() {
                return Err(Error::InvalidManifest(format!(
                    "group `{}` is declared more than once",
                    group.name()
                )));
            }
        }

        let binary = Composition::from_spec(DistributionVariant::Binary, binary, &index)?;
        let source = Composition::from_spec(DistributionVariant::Source, source, &index)?;

        let manifest = Self {
            groups,
            binary,
            source,
            build_config_name: build_config_name.into(),
        };
        manifest.check_roles()?;
        Ok(manifest)
    }

    fn check_roles(&self) -> Result<()> {
        let has_role = |variant, role| self.variant_groups(variant).any(|g| g.role() == role);

        if !has_role(DistributionVariant::Binary, GroupRole::Executables) {
            return Err(Error::InvalidManifest(
                "binary variant must include an executables group".into(),
            ));
        }
        if has_role(DistributionVariant::Binary, GroupRole::CompiledSources) {
            return Err(Error::InvalidManifest(
                "binary variant must not include compiled-sources groups".into(),
            ));
        }
        if has_role(DistributionVariant::Source, GroupRole::Executables) {
            return Err(Error::InvalidManifest(
                "source variant must not include executables groups".into(),
            ));
        }

        for group in self.groups.iter().filter(|g| {
            matches!(
                g.role(),
                GroupRole::CompiledSources | GroupRole::AuxiliarySources
            )
        }) {
            if !self
                .variant_groups(DistributionVariant::Source)
                .any(|g| g.name() == group.name())
            {
                return Err(Error::InvalidManifest(format!(
                    "source variant must include source group `{}`",
                    group.name()
                )));
            }
        }

        Ok(())
    }

    fn composition(&self, variant: DistributionVariant) -> &Composition {
        match variant {
            DistributionVariant::Binary => &self.binary,
            DistributionVariant::Source => &self.source,
        }
    }

    /// All groups in declaration order.
    pub fn groups(&self) -> &[FileGroup] {
        &self.groups
    }

    /// Looks up a group by name.
    pub fn group(&self, name: &str) -> Option<&FileGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Groups belonging to a variant, in composition order.
    pub fn variant_groups(
        &self,
        variant: DistributionVariant,
    ) -> impl Iterator<Item = &FileGroup> + '_ {
        self.composition(variant)
            .groups
            .iter()
            .map(move |&i| &self.groups[i])
    }

    /// Whether the variant carries the staged build-configuration file.
    pub fn includes_build_config(&self, variant: DistributionVariant) -> bool {
        self.composition(variant).build_config
    }

    /// Staged name of the build-configuration file.
    pub fn build_config_name(&self) -> &str {
        &self.build_config_name
    }

    /// Distinct target subdirectories used by a variant's groups.
    pub fn subdirectories(&self, variant: DistributionVariant) -> Vec<&str> {
        let mut dirs: Vec<&str> = Vec::new();
        for dir in self.variant_groups(variant).filter_map(FileGroup::dir) {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }

    /// Names of the executables the build driver has to produce.
    pub fn executable_targets(&self) -> Vec<&str> {
        self.variant_groups(DistributionVariant::Binary)
            .filter(|g| g.role() == GroupRole::Executables)
            .flat_map(FileGroup::base_names)
            .collect()
    }
}

impl Composition {
    fn from_spec(
        variant: DistributionVariant,
        spec: &VariantSpec,
        index: &HashMap<String, usize>,
    ) -> Result<Self> {
        let groups = spec
            .groups
            .iter()
            .map(|name| {
                index.get(name).copied().ok_or_else(|| {
                    Error::InvalidManifest(format!(
                        "{variant} variant references unknown group `{name}`"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            groups,
            build_config: spec.build_config,
        })
    }
}
