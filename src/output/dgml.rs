//! DGML output formatter
//!
//! Writes the graph as a Directed Graph Markup Language document that
//! Visual Studio and other DGML viewers can open.

use crate::graph::{DirectedGraph, Link, Node};
use crate::output::OutputFormatter;
use crate::visualize::Visualization;
use std::io::Write;

/// DGML document namespace
const DGML_NAMESPACE: &str = "http://schemas.microsoft.com/vs/2009/dgml";

/// DGML formatter
#[derive(Debug, Default)]
pub struct DgmlFormatter;

impl DgmlFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Write a graph as a DGML document
    pub fn write_graph(&self, graph: &DirectedGraph, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        writeln!(
            writer,
            r#"<DirectedGraph GraphDirection="{}" Layout="{}" xmlns="{}">"#,
            graph.direction, graph.layout, DGML_NAMESPACE
        )?;

        writeln!(writer, "  <Nodes>")?;
        for node in graph.nodes() {
            writeln!(writer, "    {}", node_element(node))?;
        }
        writeln!(writer, "  </Nodes>")?;

        writeln!(writer, "  <Links>")?;
        for link in graph.links() {
            writeln!(writer, "    {}", link_element(link))?;
        }
        writeln!(writer, "  </Links>")?;

        writeln!(writer, "</DirectedGraph>")
    }
}

impl OutputFormatter for DgmlFormatter {
    fn format(&self, visualization: &Visualization, writer: &mut dyn Write) -> std::io::Result<()> {
        self.write_graph(&visualization.graph, writer)
    }
}

fn node_element(node: &Node) -> String {
    let mut element = format!(
        r#"<Node Id="{}" Label="{}""#,
        escape(&node.id),
        escape(&node.label)
    );
    if let Some(background) = &node.background {
        element.push_str(&format!(r#" Background="{}""#, escape(background)));
    }
    if let Some(stroke) = &node.stroke {
        element.push_str(&format!(r#" Stroke="{}""#, escape(stroke)));
    }
    if let Some(thickness) = node.stroke_thickness {
        element.push_str(&format!(r#" StrokeThickness="{}""#, thickness));
    }
    element.push_str(" />");
    element
}

fn link_element(link: &Link) -> String {
    format!(
        r#"<Link Source="{}" Target="{}" Label="{}" Stroke="{}" />"#,
        escape(&link.source),
        escape(&link.target),
        escape(&link.label),
        escape(&link.stroke)
    )
}

/// Escape a string for use inside a double-quoted XML attribute
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
