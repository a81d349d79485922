//! upgraph - NuGet package upgrade graph library
//!
//! This library classifies how risky it is to move each declared package
//! dependency to the best version known to a catalog, and assembles the
//! results into a directed graph:
//! - Version ranges and upgrade classification
//! - Catalogs from JSON files or NuGet v3 feeds
//! - Graph assembly with shared nodes and colored links
//! - DGML, DOT, JSON and text output

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod output;
pub mod progress;
pub mod registry;
pub mod update;
pub mod visualize;
