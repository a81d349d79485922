//! Run-level visualization
//!
//! Walks packages of interest against a catalog, classifying their
//! dependencies, and draws them all into one graph so shared dependencies
//! become shared nodes. Runs are sequential; catalog errors abort the run.

use crate::catalog::Catalog;
use crate::domain::{Package, TargetFramework};
use crate::error::CatalogError;
use crate::graph::{DirectedGraph, GraphPalette, UpgradeVisualizer};
use crate::update::{UpgradeSummary, UpgradeWalker};
use serde::Serialize;
use tracing::info;

/// Options for a visualization run
#[derive(Debug, Clone, Default)]
pub struct VisualizeOptions {
    /// Only follow dependencies compatible with this framework
    pub target_framework: Option<TargetFramework>,
    pub palette: GraphPalette,
}

impl VisualizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the framework filter (builder pattern)
    pub fn with_target_framework(mut self, target_framework: Option<TargetFramework>) -> Self {
        self.target_framework = target_framework;
        self
    }

    /// Set the palette (builder pattern)
    pub fn with_palette(mut self, palette: GraphPalette) -> Self {
        self.palette = palette;
        self
    }
}

/// Result of a visualization run
#[derive(Debug, Clone, Serialize)]
pub struct Visualization {
    pub graph: DirectedGraph,
    pub summary: UpgradeSummary,
}

/// Visualize a single package
pub fn visualize_package<C: Catalog + ?Sized>(
    package: &Package,
    catalog: &C,
    options: &VisualizeOptions,
) -> Result<Visualization, CatalogError> {
    visualize_packages(std::iter::once(package), catalog, options)
}

/// Visualize several packages into one shared graph
pub fn visualize_packages<'p, C, I>(
    packages: I,
    catalog: &C,
    options: &VisualizeOptions,
) -> Result<Visualization, CatalogError>
where
    C: Catalog + ?Sized,
    I: IntoIterator<Item = &'p Package>,
{
    let walker = UpgradeWalker::new(catalog).with_target_framework(options.target_framework.clone());
    let mut graph = DirectedGraph::dependency_graph();
    let mut summary = UpgradeSummary::new();

    {
        let mut visualizer = UpgradeVisualizer::with_palette(&mut graph, options.palette.clone());
        for package in packages {
            let upgrades = walker.package_upgrades(package)?;
            visualizer.visualize(package, &upgrades);
            summary.record(&upgrades);
        }
    }

    info!(
        packages = summary.packages,
        nodes = graph.node_count(),
        links = graph.link_count(),
        "graph built"
    );
    Ok(Visualization { graph, summary })
}

/// Visualize the most recent version of every package in the catalog
pub fn visualize_catalog<C: Catalog + ?Sized>(
    catalog: &C,
    options: &VisualizeOptions,
) -> Result<Visualization, CatalogError> {
    let packages = catalog.list_most_recent_packages()?;
    visualize_packages(&packages, catalog, options)
}
