//! Resolving a package's dependencies against a catalog

use super::classify;
use crate::catalog::Catalog;
use crate::domain::{Package, PackageUpgrade, TargetFramework};
use crate::error::CatalogError;
use tracing::debug;

/// Walks the dependency declarations of packages and classifies each one
pub struct UpgradeWalker<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    target_framework: Option<TargetFramework>,
}

impl<'a, C: Catalog + ?Sized> UpgradeWalker<'a, C> {
    /// Create a walker over `catalog` with no framework filter
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            target_framework: None,
        }
    }

    /// Only follow dependencies compatible with this framework (builder pattern)
    pub fn with_target_framework(mut self, target_framework: Option<TargetFramework>) -> Self {
        self.target_framework = target_framework;
        self
    }

    pub fn target_framework(&self) -> Option<&TargetFramework> {
        self.target_framework.as_ref()
    }

    /// One upgrade record per compatible dependency, in declaration order
    ///
    /// Catalog failures are returned as-is; nothing is retried.
    pub fn package_upgrades(&self, package: &Package) -> Result<Vec<PackageUpgrade>, CatalogError> {
        let dependencies = package.compatible_dependencies(self.target_framework.as_ref());
        let mut upgrades = Vec::with_capacity(dependencies.len());

        for dependency in dependencies {
            let candidate = self.catalog.find_best_candidate(&dependency.id)?;
            let action = classify(&dependency.version_spec, candidate.as_ref());
            debug!(
                package = %package,
                dependency = %dependency,
                candidate = ?candidate.as_ref().map(|c| c.version.to_string()),
                %action,
                "classified"
            );
            upgrades.push(PackageUpgrade::new(dependency.clone(), action, candidate));
        }

        Ok(upgrades)
    }
}
