//! Upgrade graphs
//!
//! This module provides:
//! - The directed graph model with id-unique nodes and append-only links
//! - Palettes mapping upgrade actions and package states to colors
//! - The visualizer that draws packages and their upgrades into a graph

mod model;
mod palette;
mod visualizer;

pub use model::{DirectedGraph, GraphDirection, GraphLayout, Link, Node};
pub use palette::{ActionPalette, GraphPalette};
pub use visualizer::UpgradeVisualizer;
