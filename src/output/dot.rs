//! Graphviz DOT output formatter

use crate::graph::{DirectedGraph, GraphDirection, Node};
use crate::output::OutputFormatter;
use crate::visualize::Visualization;
use std::io::Write;

/// DOT formatter
#[derive(Debug, Default)]
pub struct DotFormatter;

impl DotFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Write a graph as a DOT digraph
    pub fn write_graph(&self, graph: &DirectedGraph, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "digraph upgrades {{")?;
        writeln!(writer, "  rankdir={};", rank_dir(graph.direction))?;
        writeln!(writer, "  node [shape=box];")?;

        for node in graph.nodes() {
            writeln!(writer, "  {};", node_statement(node))?;
        }
        for link in graph.links() {
            writeln!(
                writer,
                "  {} -> {} [label={}, color={}];",
                quote(&link.source),
                quote(&link.target),
                quote(&link.label),
                quote(&color(&link.stroke))
            )?;
        }

        writeln!(writer, "}}")
    }
}

impl OutputFormatter for DotFormatter {
    fn format(&self, visualization: &Visualization, writer: &mut dyn Write) -> std::io::Result<()> {
        self.write_graph(&visualization.graph, writer)
    }
}

fn rank_dir(direction: GraphDirection) -> &'static str {
    match direction {
        GraphDirection::TopToBottom => "TB",
        GraphDirection::BottomToTop => "BT",
        GraphDirection::LeftToRight => "LR",
        GraphDirection::RightToLeft => "RL",
    }
}

fn node_statement(node: &Node) -> String {
    let mut attributes = vec![format!("label={}", quote(&node.label))];
    if let Some(background) = &node.background {
        attributes.push("style=filled".to_string());
        attributes.push(format!("fillcolor={}", quote(&color(background))));
    }
    if let Some(stroke) = &node.stroke {
        attributes.push(format!("color={}", quote(&color(stroke))));
    }
    if let Some(thickness) = node.stroke_thickness {
        attributes.push(format!("penwidth={}", thickness));
    }
    format!("{} [{}]", quote(&node.id), attributes.join(", "))
}

/// Graphviz color names are lowercase X11 names; hex colors pass through
fn color(value: &str) -> String {
    if value.starts_with('#') {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
