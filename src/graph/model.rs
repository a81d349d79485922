//! Directed graph model
//!
//! Nodes are unique by id and kept in insertion order; links are an
//! append-only list. Neither nodes nor links are ever removed.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout algorithm hint for diagram viewers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphLayout {
    None,
    #[default]
    Sugiyama,
    ForceDirected,
}

impl fmt::Display for GraphLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphLayout::None => "None",
            GraphLayout::Sugiyama => "Sugiyama",
            GraphLayout::ForceDirected => "ForceDirected",
        };
        f.write_str(name)
    }
}

/// Direction in which links flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphDirection {
    TopToBottom,
    BottomToTop,
    LeftToRight,
    #[default]
    RightToLeft,
}

impl fmt::Display for GraphDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphDirection::TopToBottom => "TopToBottom",
            GraphDirection::BottomToTop => "BottomToTop",
            GraphDirection::LeftToRight => "LeftToRight",
            GraphDirection::RightToLeft => "RightToLeft",
        };
        f.write_str(name)
    }
}

/// A graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_thickness: Option<f64>,
}

impl Node {
    /// Creates an unstyled node labelled with its id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            background: None,
            stroke: None,
            stroke_thickness: None,
        }
    }
}

/// A directed link between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub label: String,
    pub stroke: String,
}

/// Directed graph of nodes and links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectedGraph {
    #[serde(default)]
    pub layout: GraphLayout,
    #[serde(default)]
    pub direction: GraphDirection,
    #[serde(with = "node_list")]
    nodes: IndexMap<String, Node>,
    links: Vec<Link>,
}

impl DirectedGraph {
    /// Creates an empty graph with default layout and direction
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the graph used for dependency diagrams: layered, flowing right to left
    pub fn dependency_graph() -> Self {
        Self {
            layout: GraphLayout::Sugiyama,
            direction: GraphDirection::RightToLeft,
            ..Self::default()
        }
    }

    /// Returns the node with `id`, appending an unstyled one if absent
    pub fn ensure_node(&mut self, id: &str) -> &mut Node {
        match self.nodes.entry(id.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Node::new(id)),
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Links in insertion order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Appends a link, creating missing endpoint nodes first
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        label: impl Into<String>,
        stroke: impl Into<String>,
    ) -> &Link {
        self.ensure_node(source);
        self.ensure_node(target);
        self.links.push(Link {
            source: source.to_string(),
            target: target.to_string(),
            label: label.into(),
            stroke: stroke.into(),
        });
        &self.links[self.links.len() - 1]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Links whose target is `id`
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |link| link.target == id)
    }
}

/// Nodes serialize as a plain list, keyed back by id on the way in
mod node_list {
    use super::Node;
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        nodes: &IndexMap<String, Node>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(nodes.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<String, Node>, D::Error> {
        let nodes = Vec::<Node>::deserialize(deserializer)?;
        Ok(nodes.into_iter().map(|node| (node.id.clone(), node)).collect())
    }
}
