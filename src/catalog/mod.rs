//! Package catalogs
//!
//! This module provides:
//! - The `Catalog` capability the upgrade walker resolves dependencies against
//! - An in-memory catalog, loadable from a JSON file
//! - Loading an in-memory catalog from a remote package feed

mod feed;
mod memory;

pub use feed::load_from_feed;
pub use memory::InMemoryCatalog;

use crate::domain::{NuGetVersion, Package};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Source of packages for upgrade classification
pub trait Catalog {
    /// The single most relevant known version of a package id, if any
    fn find_best_candidate(&self, package_id: &str) -> Result<Option<Package>, CatalogError>;

    /// One package per distinct id, each at its most relevant version
    fn list_most_recent_packages(&self) -> Result<Vec<Package>, CatalogError>;
}

/// Rules for choosing the best candidate among the versions of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePolicy {
    /// Whether prerelease versions may be chosen over releases
    pub include_prerelease: bool,
}

impl Default for CandidatePolicy {
    fn default() -> Self {
        Self {
            include_prerelease: true,
        }
    }
}

impl CandidatePolicy {
    /// A policy that prefers release versions
    pub fn stable_only() -> Self {
        Self {
            include_prerelease: false,
        }
    }

    /// Pick the best version
    ///
    /// Listed versions win over unlisted ones, then versions the policy
    /// accepts, then the highest version. A package whose versions are all
    /// rejected by the policy still yields its best rejected version.
    pub fn select<'a>(&self, versions: &'a [Package]) -> Option<&'a Package> {
        versions.iter().max_by(|a, b| self.rank(a).cmp(&self.rank(b)))
    }

    fn rank<'a>(&self, package: &'a Package) -> (bool, bool, &'a NuGetVersion) {
        let accepted = self.include_prerelease || package.is_release_version();
        (package.listed, accepted, &package.version)
    }
}
