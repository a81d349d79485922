//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of graph nodes and links
//! - Run summary, omitted in quiet mode

use crate::graph::{GraphDirection, GraphLayout, Link, Node};
use crate::output::{OutputFormatter, Verbosity};
use crate::update::UpgradeSummary;
use crate::visualize::Visualization;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of a visualization
#[derive(Serialize)]
struct JsonOutput<'a> {
    layout: GraphLayout,
    direction: GraphDirection,
    nodes: Vec<&'a Node>,
    links: &'a [Link],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a UpgradeSummary>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, visualization: &Visualization, writer: &mut dyn Write) -> std::io::Result<()> {
        let graph = &visualization.graph;
        let output = JsonOutput {
            layout: graph.layout,
            direction: graph.direction,
            nodes: graph.nodes().collect(),
            links: graph.links(),
            summary: (self.verbosity != Verbosity::Quiet).then_some(&visualization.summary),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
