//! In-memory catalog
//!
//! Holds every known version of every package. Package ids are matched
//! case-insensitively, ids keep the order in which they were first added.

use super::{CandidatePolicy, Catalog};
use crate::domain::Package;
use crate::error::CatalogError;
use indexmap::IndexMap;
use std::path::Path;

/// Catalog backed by a map from package id to its versions
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    packages: IndexMap<String, Vec<Package>>,
    policy: CandidatePolicy,
}

impl InMemoryCatalog {
    /// Create an empty catalog with the default candidate policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given packages
    pub fn from_packages(packages: impl IntoIterator<Item = Package>) -> Self {
        let mut catalog = Self::new();
        for package in packages {
            catalog.add(package);
        }
        catalog
    }

    /// Parse a catalog from a JSON array of packages
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let packages: Vec<Package> = serde_json::from_str(json)?;
        Ok(Self::from_packages(packages))
    }

    /// Read a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::invalid_catalog(path, e.to_string()))?;
        Self::from_json_str(&content)
            .map_err(|e| CatalogError::invalid_catalog(path, e.to_string()))
    }

    /// Set the candidate policy (builder pattern)
    pub fn with_policy(mut self, policy: CandidatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CandidatePolicy {
        self.policy
    }

    /// Add a package version, replacing an existing entry with the same version
    pub fn add(&mut self, package: Package) {
        let versions = self
            .packages
            .entry(package.id.to_lowercase())
            .or_default();
        match versions.iter_mut().find(|p| p.version == package.version) {
            Some(existing) => *existing = package,
            None => versions.push(package),
        }
    }

    /// All known versions of a package id
    pub fn versions(&self, package_id: &str) -> &[Package] {
        self.packages
            .get(&package_id.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct package ids
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if the catalog holds no packages
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Number of package versions across all ids
    pub fn version_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }
}

impl Catalog for InMemoryCatalog {
    fn find_best_candidate(&self, package_id: &str) -> Result<Option<Package>, CatalogError> {
        Ok(self.policy.select(self.versions(package_id)).cloned())
    }

    fn list_most_recent_packages(&self) -> Result<Vec<Package>, CatalogError> {
        Ok(self
            .packages
            .values()
            .filter_map(|versions| self.policy.select(versions).cloned())
            .collect())
    }
}
