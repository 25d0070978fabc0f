//! File groups: named, ordered sets of base names sharing a role.

use crate::packager::error::{Error, Result};
use std::collections::HashSet;

/// What the files of a group are for.
///
/// Roles drive the variant invariants: the binary distribution must carry
/// executables and no compiled sources, the source distribution must carry
/// every compiled and auxiliary source group and no executables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupRole {
    /// Prebuilt executables, produced by the build driver
    Executables,
    /// Primary-language (C++) translation units
    CompiledSources,
    /// Auxiliary-language (C) translation units
    AuxiliarySources,
    /// Header files
    Headers,
    /// Manuals and their sources
    Documentation,
    /// Example configurations and data
    Examples,
    /// Regression test drivers
    TestScripts,
    /// Regression test inputs and reference outputs
    TestFixtures,
    /// Licenses, readmes and other required files
    Misc,
}

/// A named collection of base names with an extension rule and a target
/// subdirectory.
///
/// The base names are kept as the declared whitespace-separated block; they
/// are split on demand by [`FileGroup::base_names`]. Groups are immutable
/// once constructed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileGroup {
    name: String,
    role: GroupRole,
    block: String,
    extension: Option<String>,
    dir: Option<String>,
}

impl FileGroup {
    /// Creates a group from a declared base-name block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidManifest`] if a base name appears twice, if a
    /// base name or the subdirectory escapes the distribution root, or if the
    /// extension contains a path separator or whitespace.
    pub fn new(
        name: impl Into<String>,
        role: GroupRole,
        block: impl Into<String>,
        extension: Option<String>,
        dir: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        let extension = extension.filter(|ext| !ext.is_empty());
        let dir = dir
            .map(|d| d.trim_matches('/').to_string())
            .filter(|d| !d.is_empty());

        let group = Self {
            block: block.into(),
            name,
            role,
            extension,
            dir,
        };
        group.validate()?;
        Ok(group)
    }

    /// Creates a group from an explicit list of base names.
    pub fn from_names(
        name: impl Into<String>,
        role: GroupRole,
        names: &[String],
        extension: Option<String>,
        dir: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        if let Some(bad) = names
            .iter()
            .find(|n| n.split_whitespace().count() != 1)
        {
            return Err(Error::InvalidManifest(format!(
                "group `{name}`: base name {bad:?} must be a single non-empty word"
            )));
        }
        Self::new(name, role, names.join("\n"), extension, dir)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for base in self.base_names() {
            if !seen.insert(base) {
                return Err(Error::InvalidManifest(format!(
                    "group `{}` declares `{base}` more than once",
                    self.name
                )));
            }
            if !is_relative_path(base) {
                return Err(Error::InvalidManifest(format!(
                    "group `{}`: `{base}` must be a relative path inside the distribution",
                    self.name
                )));
            }
        }

        if let Some(dir) = self.dir.as_deref().filter(|d| !is_relative_path(d)) {
            return Err(Error::InvalidManifest(format!(
                "group `{}`: directory `{dir}` must be relative",
                self.name
            )));
        }

        if let Some(ext) = self
            .extension
            .as_deref()
            .filter(|e| e.contains('/') || e.contains(char::is_whitespace))
        {
            return Err(Error::InvalidManifest(format!(
                "group `{}`: extension {ext:?} is not a plain suffix",
                self.name
            )));
        }

        Ok(())
    }

    /// Group name, unique within a manifest.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role of the group's files.
    pub fn role(&self) -> GroupRole {
        self.role
    }

    /// Base names in declaration order.
    pub fn base_names(&self) -> impl Iterator<Item = &str> {
        self.block.split_whitespace()
    }

    /// Number of declared base names.
    pub fn len(&self) -> usize {
        self.base_names().count()
    }

    /// True if the block declares no names.
    pub fn is_empty(&self) -> bool {
        self.base_names().next().is_none()
    }

    /// Suffix appended to every base name, if any.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Target subdirectory, or `None` for the distribution root.
    pub fn dir(&self) -> Option<&str> {
        self.dir.as_deref()
    }
}

fn is_relative_path(path: &str) -> bool {
    !path.starts_with('/')
        && !path.contains('\\')
        && path.split('/').all(|c| !c.is_empty() && c != "." && c != "..")
}
