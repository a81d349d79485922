//! Dependency declarations

use super::{TargetFramework, VersionSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A constraint one package places on another package id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageDependency {
    /// Id of the required package
    pub id: String,
    /// Accepted versions of the required package
    #[serde(rename = "range", default)]
    pub version_spec: VersionSpec,
}

impl PackageDependency {
    /// Creates a new dependency
    pub fn new(id: impl Into<String>, version_spec: VersionSpec) -> Self {
        Self {
            id: id.into(),
            version_spec,
        }
    }
}

impl fmt::Display for PackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version_spec)
    }
}

/// Dependencies declared for one target framework, or for all frameworks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DependencyGroup {
    /// Framework the group applies to; `None` means framework-agnostic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_framework: Option<TargetFramework>,
    /// Dependencies in declaration order
    #[serde(default)]
    pub dependencies: Vec<PackageDependency>,
}

impl DependencyGroup {
    /// Creates a framework-agnostic group
    pub fn new(dependencies: Vec<PackageDependency>) -> Self {
        Self {
            target_framework: None,
            dependencies,
        }
    }

    /// Creates a group for a specific framework
    pub fn for_framework(framework: TargetFramework, dependencies: Vec<PackageDependency>) -> Self {
        Self {
            target_framework: Some(framework),
            dependencies,
        }
    }
}
