//! Expansion of file groups into relative distribution paths.

use super::{DistributionVariant, FileGroup, Manifest};

/// Ordered list of `/`-separated paths relative to the distribution root.
///
/// These are both the staging-tree locations and the archive entry names.
/// Order is declaration order and duplicates are kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResolvedFileList(Vec<String>);

impl ResolvedFileList {
    /// Paths in order.
    pub fn paths(&self) -> &[String] {
        &self.0
    }

    /// Iterator over the paths.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of paths, duplicates included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the list holds no paths.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `path` appears at least once.
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|p| p == path)
    }

    /// Appends another list, keeping duplicates.
    pub fn extend(&mut self, other: ResolvedFileList) {
        self.0.extend(other.0);
    }

    /// Appends one path.
    pub fn push(&mut self, path: impl Into<String>) {
        self.0.push(path.into());
    }
}

impl FromIterator<String> for ResolvedFileList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ResolvedFileList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ResolvedFileList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Resolves a group to `[dir/]name[ext]` for every base name.
pub fn resolve(group: &FileGroup) -> ResolvedFileList {
    group
        .base_names()
        .map(|name| {
            let file = match group.extension() {
                Some(ext) => format!("{name}{ext}"),
                None => name.to_string(),
            };
            match group.dir() {
                Some(dir) => format!("{dir}/{file}"),
                None => file,
            }
        })
        .collect()
}

impl Manifest {
    /// Concatenates the resolved lists of a variant's groups.
    ///
    /// Paths shared between groups appear once per group; nothing is
    /// deduplicated. The staged build-configuration file closes the list
    /// when the variant declares it.
    pub fn compose_variant(&self, variant: DistributionVariant) -> ResolvedFileList {
        let mut list = ResolvedFileList::default();
        for group in self.variant_groups(variant) {
            list.extend(resolve(group));
        }
        if self.includes_build_config(variant) {
            list.push(self.build_config_name());
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::manifest::{GroupRole, VariantSpec};

    fn group(name: &str, role: GroupRole, block: &str, ext: Option<&str>, dir: Option<&str>) -> FileGroup {
        FileGroup::new(name, role, block, ext.map(String::from), dir.map(String::from)).unwrap()
    }

    fn spec(groups: &[&str], build_config: bool) -> VariantSpec {
        VariantSpec {
            groups: groups.iter().map(|g| g.to_string()).collect(),
            build_config,
        }
    }

    #[test]
    fn resolve_applies_extension_then_directory() {
        let funcobj = group(
            "funcobj",
            GroupRole::CompiledSources,
            "function_object func_gaussian",
            Some(".cpp"),
            Some("function_objects"),
        );
        assert_eq!(
            resolve(&funcobj).paths(),
            [
                "function_objects/function_object.cpp",
                "function_objects/func_gaussian.cpp"
            ]
        );
    }

    #[test]
    fn resolve_root_group_without_extension() {
        let misc = group("misc", GroupRole::Misc, "COPYING.txt DISCLAIMER", None, None);
        assert_eq!(resolve(&misc).paths(), ["COPYING.txt", "DISCLAIMER"]);
    }

    #[test]
    fn resolve_empty_group_is_empty_list() {
        let empty = group("empty", GroupRole::Misc, "", Some(".h"), Some("x"));
        assert!(resolve(&empty).is_empty());
    }

    #[test]
    fn compose_keeps_cross_group_duplicates() {
        let manifest = Manifest::new(
            vec![
                group("bin", GroupRole::Executables, "imfit", None, None),
                group("cpp", GroupRole::CompiledSources, "model_object", Some(".cpp"), None),
                group("a", GroupRole::Misc, "README.txt", None, None),
                group("b", GroupRole::Misc, "README.txt", None, None),
            ],
            &spec(&["bin", "a", "b"], false),
            &spec(&["cpp", "a", "b"], true),
            "SConstruct",
        )
        .unwrap();

        assert_eq!(
            manifest.compose_variant(DistributionVariant::Binary).paths(),
            ["imfit", "README.txt", "README.txt"]
        );
        assert_eq!(
            manifest.compose_variant(DistributionVariant::Source).paths(),
            ["model_object.cpp", "README.txt", "README.txt", "SConstruct"]
        );
    }
}
