//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-action upgrade counts, colored by risk
//! - Missing dependency listing
//! - Link listing in verbose mode

use crate::domain::UpgradeAction;
use crate::output::{OutputFormatter, Verbosity};
use crate::visualize::Visualization;
use colored::{ColoredString, Colorize};
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, action: UpgradeAction, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        action_style(action, text).to_string()
    }

    fn write_links(&self, visualization: &Visualization, writer: &mut dyn Write) -> std::io::Result<()> {
        let links = visualization.graph.links();
        if links.is_empty() {
            return Ok(());
        }

        let width = links.iter().map(|l| l.source.len()).max().unwrap_or(0);
        writeln!(writer)?;
        for link in links {
            let arrow = if self.color {
                "→".dimmed().to_string()
            } else {
                "→".to_string()
            };
            writeln!(
                writer,
                "  {:width$} {} {} [{}]",
                link.source,
                arrow,
                link.target,
                link.label,
                width = width
            )?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, visualization: &Visualization, writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = &visualization.summary;

        if self.verbosity != Verbosity::Quiet {
            writeln!(
                writer,
                "{} packages, {} nodes, {} links",
                summary.packages,
                visualization.graph.node_count(),
                visualization.graph.link_count()
            )?;
        }

        if summary.total_upgrades() == 0 {
            writeln!(writer, "No dependencies to classify")?;
        } else {
            let width = UpgradeAction::all()
                .iter()
                .map(|a| a.display_name().len())
                .max()
                .unwrap_or(0);
            for action in UpgradeAction::all() {
                let count = summary.count(*action);
                if count == 0 && self.verbosity != Verbosity::Verbose {
                    continue;
                }
                let name = format!("{:width$}", action.display_name(), width = width);
                writeln!(writer, "  {} {:>5}", self.paint(*action, &name), count)?;
            }
        }

        if summary.has_missing() {
            let missing: Vec<&str> = summary.missing.iter().map(String::as_str).collect();
            let label = if self.color {
                "Missing:".red().bold().to_string()
            } else {
                "Missing:".to_string()
            };
            writeln!(writer, "{} {}", label, missing.join(", "))?;
        }

        if self.verbosity == Verbosity::Verbose {
            self.write_links(visualization, writer)?;
        }

        Ok(())
    }
}

fn action_style(action: UpgradeAction, text: &str) -> ColoredString {
    match action {
        UpgradeAction::None => text.dimmed(),
        UpgradeAction::MinVersion => text.green(),
        UpgradeAction::ReleaseToRelease => text.yellow(),
        UpgradeAction::PrereleaseToRelease => text.yellow().bold(),
        UpgradeAction::PrereleaseToPrerelease => text.red(),
        UpgradeAction::ReleaseToPrerelease => text.red().bold(),
        UpgradeAction::Unknown => text.bright_black(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_version, Package, PackageDependency, PackageUpgrade, VersionSpec};
    use crate::graph::DirectedGraph;
    use crate::update::UpgradeSummary;

    fn visualization() -> Visualization {
        let mut graph = DirectedGraph::dependency_graph();
        graph.connect("A 1.0.0", "B 2.0.0", "1.0.0", "ForestGreen");
        graph.connect("A 1.0.0", "C", "1.0.0", "DarkGray");

        let b = Package::new("B", parse_version("2.0.0").unwrap());
        let mut summary = UpgradeSummary::new();
        summary.record(&[
            PackageUpgrade::new(
                PackageDependency::new("B", VersionSpec::any()),
                UpgradeAction::MinVersion,
                Some(b),
            ),
            PackageUpgrade::new(
                PackageDependency::new("C", VersionSpec::any()),
                UpgradeAction::Unknown,
                None,
            ),
        ]);
        Visualization { graph, summary }
    }

    fn render(verbosity: Verbosity) -> String {
        let mut buf = Vec::new();
        TextFormatter::with_color(verbosity, false)
            .format(&visualization(), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_normal() {
        let output = render(Verbosity::Normal);
        assert!(output.contains("1 packages, 3 nodes, 2 links"));
        assert!(output.contains("min version"));
        assert!(output.contains("unknown"));
        assert!(!output.contains("release to prerelease"));
        assert!(output.contains("Missing: C"));
        assert!(!output.contains("→"));
    }

    #[test]
    fn test_text_verbose_lists_links_and_zero_counts() {
        let output = render(Verbosity::Verbose);
        assert!(output.contains("release to prerelease"));
        assert!(output.contains("A 1.0.0 → B 2.0.0 [1.0.0]"));
    }

    #[test]
    fn test_text_quiet_skips_header() {
        let output = render(Verbosity::Quiet);
        assert!(!output.contains("packages,"));
        assert!(output.contains("Missing: C"));
    }

    #[test]
    fn test_text_empty() {
        let mut buf = Vec::new();
        let empty = Visualization {
            graph: DirectedGraph::dependency_graph(),
            summary: UpgradeSummary::new(),
        };
        TextFormatter::new(Verbosity::Normal)
            .format(&empty, &mut buf)
            .unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("No dependencies to classify"));
    }
}
