//! Drawing packages and their upgrades into a shared graph

use super::{DirectedGraph, GraphPalette};
use crate::domain::{Package, PackageUpgrade};

/// Adds packages and their classified dependencies to a graph
///
/// Nodes are identified by `"{id} {version}"`; a dependency that could not
/// be resolved is identified by its bare id. Repeated packages reuse their
/// node, links are always appended.
pub struct UpgradeVisualizer<'a> {
    graph: &'a mut DirectedGraph,
    palette: GraphPalette,
}

impl<'a> UpgradeVisualizer<'a> {
    /// Create a visualizer with the default palette
    pub fn new(graph: &'a mut DirectedGraph) -> Self {
        Self::with_palette(graph, GraphPalette::default())
    }

    pub fn with_palette(graph: &'a mut DirectedGraph, palette: GraphPalette) -> Self {
        Self { graph, palette }
    }

    pub fn palette(&self) -> &GraphPalette {
        &self.palette
    }

    /// Draw `package` and one link per upgrade record
    pub fn visualize(&mut self, package: &Package, upgrades: &[PackageUpgrade]) {
        let source = package.full_name();
        let node = self.graph.ensure_node(&source);
        if !package.is_release_version() {
            node.background = Some(self.palette.prerelease_background.clone());
        }

        for upgrade in upgrades {
            let target = match &upgrade.candidate {
                Some(candidate) => candidate.full_name(),
                None => upgrade.dependency.id.clone(),
            };

            let node = self.graph.ensure_node(&target);
            if upgrade.is_missing() {
                node.stroke = Some(self.palette.missing_package_stroke.clone());
                node.stroke_thickness = Some(self.palette.missing_package_stroke_thickness);
            }

            self.graph.connect(
                &source,
                &target,
                upgrade.dependency.version_spec.to_string(),
                self.palette.actions.color(upgrade.action),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_version, PackageDependency, UpgradeAction, VersionSpec};

    fn package(id: &str, v: &str) -> Package {
        Package::new(id, parse_version(v).unwrap())
    }

    fn upgrade(id: &str, spec: &str, action: UpgradeAction, candidate: Option<&str>) -> PackageUpgrade {
        PackageUpgrade::new(
            PackageDependency::new(id, spec.parse::<VersionSpec>().unwrap()),
            action,
            candidate.map(|v| package(id, v)),
        )
    }

    #[test]
    fn test_visualize_package_without_upgrades() {
        let mut graph = DirectedGraph::new();
        UpgradeVisualizer::new(&mut graph).visualize(&package("A", "1.0.0"), &[]);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.link_count(), 0);
        let node = graph.node("A 1.0.0").unwrap();
        assert_eq!(node.label, "A 1.0.0");
        assert!(node.background.is_none());
    }

    #[test]
    fn test_visualize_prerelease_background() {
        let mut graph = DirectedGraph::new();
        UpgradeVisualizer::new(&mut graph).visualize(&package("A", "1.0.0-beta"), &[]);
        assert_eq!(
            graph.node("A 1.0.0-beta").unwrap().background.as_deref(),
            Some("Gainsboro")
        );
    }

    #[test]
    fn test_visualize_restyles_reused_node() {
        let mut graph = DirectedGraph::new();
        let mut visualizer = UpgradeVisualizer::new(&mut graph);
        visualizer.visualize(
            &package("A", "1.0.0"),
            &[upgrade("B", "1.0.0-rc", UpgradeAction::MinVersion, Some("2.0.0-rc"))],
        );
        visualizer.visualize(&package("B", "2.0.0-rc"), &[]);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(
            graph.node("B 2.0.0-rc").unwrap().background.as_deref(),
            Some("Gainsboro")
        );
    }

    #[test]
    fn test_visualize_link_label_and_stroke() {
        let mut graph = DirectedGraph::new();
        UpgradeVisualizer::new(&mut graph).visualize(
            &package("A", "1.0.0"),
            &[upgrade("B", "[1.0.0, 2.0.0]", UpgradeAction::ReleaseToRelease, Some("3.0.0"))],
        );

        let link = &graph.links()[0];
        assert_eq!(link.source, "A 1.0.0");
        assert_eq!(link.target, "B 3.0.0");
        assert_eq!(link.label, "[1.0.0, 2.0.0]");
        assert_eq!(link.stroke, "Goldenrod");
    }

    #[test]
    fn test_visualize_missing_dependency() {
        let mut graph = DirectedGraph::new();
        UpgradeVisualizer::new(&mut graph).visualize(
            &package("A", "1.0.0"),
            &[upgrade("C", "1.0.0", UpgradeAction::Unknown, None)],
        );

        let node = graph.node("C").unwrap();
        assert_eq!(node.stroke.as_deref(), Some("Red"));
        assert_eq!(node.stroke_thickness, Some(2.0));
        assert_eq!(graph.links()[0].stroke, "DarkGray");
        assert_eq!(graph.links()[0].target, "C");
    }

    #[test]
    fn test_visualize_twice_reuses_nodes_and_appends_links() {
        let mut graph = DirectedGraph::new();
        let a = package("A", "1.0.0");
        let upgrades = [upgrade("B", "1.0.0", UpgradeAction::None, Some("1.0.0"))];
        {
            let mut visualizer = UpgradeVisualizer::new(&mut graph);
            visualizer.visualize(&a, &upgrades);
            visualizer.visualize(&a, &upgrades);
        }

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 2);
        for link in graph.links() {
            assert!(graph.node(&link.source).is_some());
            assert!(graph.node(&link.target).is_some());
        }
    }

    #[test]
    fn test_visualize_custom_palette() {
        let mut graph = DirectedGraph::new();
        let mut palette = GraphPalette::default();
        palette.actions.min_version = "#00FF00".to_string();
        palette.missing_package_stroke = "Purple".to_string();
        palette.missing_package_stroke_thickness = 3.5;

        let mut visualizer = UpgradeVisualizer::with_palette(&mut graph, palette);
        assert_eq!(visualizer.palette().missing_package_stroke, "Purple");
        visualizer.visualize(
            &package("A", "1.0.0"),
            &[
                upgrade("B", "1.0.0", UpgradeAction::MinVersion, Some("1.5.0")),
                upgrade("C", "1.0.0", UpgradeAction::Unknown, None),
            ],
        );

        assert_eq!(graph.links()[0].stroke, "#00FF00");
        let missing = graph.node("C").unwrap();
        assert_eq!(missing.stroke.as_deref(), Some("Purple"));
        assert_eq!(missing.stroke_thickness, Some(3.5));
    }
}
