//! Versioned packages

use super::{DependencyGroup, NuGetVersion, PackageDependency, TargetFramework};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_listed() -> bool {
    true
}

/// One version of a package as published in a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package id
    pub id: String,
    /// Package version
    pub version: NuGetVersion,
    /// Dependency declarations, grouped by target framework
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependency_groups: Vec<DependencyGroup>,
    /// Whether the version is listed in its feed
    #[serde(default = "default_listed")]
    pub listed: bool,
    /// When the version was published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl Package {
    /// Creates a listed package without dependencies
    pub fn new(id: impl Into<String>, version: NuGetVersion) -> Self {
        Self {
            id: id.into(),
            version,
            dependency_groups: Vec::new(),
            listed: true,
            published: None,
        }
    }

    /// Adds a framework-agnostic dependency (builder pattern)
    pub fn with_dependency(mut self, dependency: PackageDependency) -> Self {
        match self
            .dependency_groups
            .iter_mut()
            .find(|g| g.target_framework.is_none())
        {
            Some(group) => group.dependencies.push(dependency),
            None => self
                .dependency_groups
                .push(DependencyGroup::new(vec![dependency])),
        }
        self
    }

    /// Adds a dependency group (builder pattern)
    pub fn with_group(mut self, group: DependencyGroup) -> Self {
        self.dependency_groups.push(group);
        self
    }

    /// Marks the package as unlisted (builder pattern)
    pub fn unlisted(mut self) -> Self {
        self.listed = false;
        self
    }

    /// Display identity: `"{id} {version}"`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.id, self.version)
    }

    /// Returns true if the version carries no prerelease label
    pub fn is_release_version(&self) -> bool {
        self.version.is_release()
    }

    /// Dependencies applicable to the given framework, in declaration order
    ///
    /// Without a filter (or with the `any` framework) every group contributes.
    /// Otherwise the groups of the nearest compatible framework are used (see
    /// [`TargetFramework::nearest`]); when none is compatible, the
    /// framework-agnostic groups apply.
    pub fn compatible_dependencies(
        &self,
        target_framework: Option<&TargetFramework>,
    ) -> Vec<&PackageDependency> {
        let framework = match target_framework {
            Some(framework) if !framework.is_any() => framework,
            _ => {
                return self
                    .dependency_groups
                    .iter()
                    .flat_map(|g| g.dependencies.iter())
                    .collect();
            }
        };

        let nearest = framework.nearest(
            self.dependency_groups
                .iter()
                .filter_map(|g| g.target_framework.as_ref()),
        );
        let matching: Vec<&DependencyGroup> = match nearest {
            Some(nearest) => self
                .dependency_groups
                .iter()
                .filter(|g| g.target_framework.as_ref() == Some(nearest))
                .collect(),
            None => Vec::new(),
        };

        let groups = if matching.is_empty() {
            self.dependency_groups
                .iter()
                .filter(|g| g.target_framework.is_none())
                .collect()
        } else {
            matching
        };

        groups
            .into_iter()
            .flat_map(|g| g.dependencies.iter())
            .collect()
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_version, VersionSpec};

    fn package(id: &str, version: &str) -> Package {
        Package::new(id, parse_version(version).unwrap())
    }

    fn dep(id: &str) -> PackageDependency {
        PackageDependency::new(id, VersionSpec::any())
    }

    fn ids(deps: Vec<&PackageDependency>) -> Vec<&str> {
        deps.into_iter().map(|d| d.id.as_str()).collect()
    }

    fn multi_target() -> Package {
        package("A", "1.0.0")
            .with_group(DependencyGroup::new(vec![dep("Common")]))
            .with_group(DependencyGroup::for_framework(
                TargetFramework::new("net8.0"),
                vec![dep("Modern"), dep("Shared")],
            ))
            .with_group(DependencyGroup::for_framework(
                TargetFramework::new("net48"),
                vec![dep("Legacy")],
            ))
    }

    #[test]
    fn test_full_name() {
        assert_eq!(package("A", "1.2.4").full_name(), "A 1.2.4");
        assert_eq!(package("A", "1.0.0-a").full_name(), "A 1.0.0-a");
    }

    #[test]
    fn test_is_release_version() {
        assert!(package("A", "1.0.0").is_release_version());
        assert!(!package("A", "1.0.0-beta").is_release_version());
    }

    #[test]
    fn test_with_dependency_appends_to_agnostic_group() {
        let pkg = package("A", "1.0.0").with_dependency(dep("B")).with_dependency(dep("C"));
        assert_eq!(pkg.dependency_groups.len(), 1);
        assert_eq!(ids(pkg.compatible_dependencies(None)), vec!["B", "C"]);
    }

    #[test]
    fn test_compatible_without_filter_returns_all_groups_in_order() {
        let pkg = multi_target();
        assert_eq!(
            ids(pkg.compatible_dependencies(None)),
            vec!["Common", "Modern", "Shared", "Legacy"]
        );
    }

    #[test]
    fn test_compatible_with_any_framework_returns_all_groups() {
        let pkg = multi_target();
        let any = TargetFramework::any();
        assert_eq!(pkg.compatible_dependencies(Some(&any)).len(), 4);
    }

    #[test]
    fn test_compatible_with_matching_framework() {
        let pkg = multi_target();
        let net8 = TargetFramework::new("NET8.0");
        assert_eq!(
            ids(pkg.compatible_dependencies(Some(&net8))),
            vec!["Modern", "Shared"]
        );
    }

    #[test]
    fn test_compatible_falls_back_to_agnostic_groups() {
        let pkg = multi_target();
        let net6 = TargetFramework::new("net6.0");
        assert_eq!(ids(pkg.compatible_dependencies(Some(&net6))), vec!["Common"]);
    }

    #[test]
    fn test_compatible_picks_nearest_framework_group() {
        let pkg = package("A", "1.0.0")
            .with_group(DependencyGroup::for_framework(
                TargetFramework::new("netstandard2.0"),
                vec![dep("Standard")],
            ))
            .with_group(DependencyGroup::for_framework(
                TargetFramework::new("net6.0"),
                vec![dep("Six")],
            ));

        let net8 = TargetFramework::new("net8.0");
        assert_eq!(ids(pkg.compatible_dependencies(Some(&net8))), vec!["Six"]);
        let net48 = TargetFramework::new("net48");
        assert_eq!(ids(pkg.compatible_dependencies(Some(&net48))), vec!["Standard"]);
    }

    #[test]
    fn test_compatible_uses_netstandard_group_for_newer_framework() {
        let pkg = package("A", "1.0.0")
            .with_group(DependencyGroup::new(vec![dep("Common")]))
            .with_group(DependencyGroup::for_framework(
                TargetFramework::new(".NETStandard2.0"),
                vec![dep("Standard")],
            ));
        let net8 = TargetFramework::new("net8.0");
        assert_eq!(ids(pkg.compatible_dependencies(Some(&net8))), vec!["Standard"]);
    }

    #[test]
    fn test_compatible_with_no_match_and_no_agnostic_group() {
        let pkg = package("A", "1.0.0").with_group(DependencyGroup::for_framework(
            TargetFramework::new("net48"),
            vec![dep("Legacy")],
        ));
        let net8 = TargetFramework::new("net8.0");
        assert!(pkg.compatible_dependencies(Some(&net8)).is_empty());
    }

    #[test]
    fn test_serde_package_defaults() {
        let pkg: Package = serde_json::from_str(r#"{"id": "A", "version": "1.0"}"#).unwrap();
        assert_eq!(pkg.version, parse_version("1.0.0").unwrap());
        assert!(pkg.listed);
        assert!(pkg.dependency_groups.is_empty());
        assert!(pkg.published.is_none());
    }

    #[test]
    fn test_serde_package_with_groups() {
        let json = r#"{
            "id": "A",
            "version": "2.0.0-rc.1",
            "listed": false,
            "dependency_groups": [
                {"target_framework": "net8.0", "dependencies": [{"id": "B", "range": "[1.0, )"}]}
            ]
        }"#;
        let pkg: Package = serde_json::from_str(json).unwrap();
        assert!(!pkg.listed);
        assert!(!pkg.is_release_version());
        let net8 = TargetFramework::new("net8.0");
        assert_eq!(ids(pkg.compatible_dependencies(Some(&net8))), vec!["B"]);
    }
}
