//! Upgrade classification result types

use super::{Package, PackageDependency};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk category of moving a dependency to its best known candidate
///
/// Variants are declared in order of increasing risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeAction {
    /// The constraint already points at the candidate
    None,
    /// The candidate satisfies the constraint but is above its minimum
    MinVersion,
    /// A release-pinned constraint, newer release available
    ReleaseToRelease,
    /// A prerelease-tolerant constraint, newer release available
    PrereleaseToRelease,
    /// A prerelease-tolerant constraint, newer prerelease available
    PrereleaseToPrerelease,
    /// A release-pinned constraint, only a newer prerelease available
    ReleaseToPrerelease,
    /// No candidate exists in the catalog
    Unknown,
}

impl UpgradeAction {
    /// Returns all actions in order of increasing risk
    pub fn all() -> &'static [UpgradeAction] {
        &[
            UpgradeAction::None,
            UpgradeAction::MinVersion,
            UpgradeAction::ReleaseToRelease,
            UpgradeAction::PrereleaseToRelease,
            UpgradeAction::PrereleaseToPrerelease,
            UpgradeAction::ReleaseToPrerelease,
            UpgradeAction::Unknown,
        ]
    }

    /// Returns the display name for this action
    pub fn display_name(&self) -> &'static str {
        match self {
            UpgradeAction::None => "none",
            UpgradeAction::MinVersion => "min version",
            UpgradeAction::ReleaseToRelease => "release to release",
            UpgradeAction::PrereleaseToRelease => "prerelease to release",
            UpgradeAction::PrereleaseToPrerelease => "prerelease to prerelease",
            UpgradeAction::ReleaseToPrerelease => "release to prerelease",
            UpgradeAction::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UpgradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Classification of one dependency constraint against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageUpgrade {
    /// The constraint being classified
    pub dependency: PackageDependency,
    /// The classified risk
    pub action: UpgradeAction,
    /// Best known package for the dependency id, if the catalog has one
    pub candidate: Option<Package>,
}

impl PackageUpgrade {
    /// Creates a new upgrade record
    pub fn new(
        dependency: PackageDependency,
        action: UpgradeAction,
        candidate: Option<Package>,
    ) -> Self {
        Self {
            dependency,
            action,
            candidate,
        }
    }

    /// Returns true if the dependency id could not be resolved at all
    pub fn is_missing(&self) -> bool {
        self.candidate.is_none()
    }
}

impl fmt::Display for PackageUpgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.candidate {
            Some(candidate) => write!(
                f,
                "{} {} → {} ({})",
                self.dependency.id, self.dependency.version_spec, candidate.version, self.action
            ),
            None => write!(
                f,
                "{} {}: missing ({})",
                self.dependency.id, self.dependency.version_spec, self.action
            ),
        }
    }
}
