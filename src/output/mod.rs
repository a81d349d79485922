//! Output formatting for upgrade graphs
//!
//! This module provides:
//! - DGML output for diagram viewers
//! - Graphviz DOT output
//! - JSON output for machine processing
//! - Text output for a human-readable summary

mod dgml;
mod dot;
mod json;
mod text;

pub use dgml::DgmlFormatter;
pub use dot::DotFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::visualize::Visualization;
use clap::ValueEnum;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Directed Graph Markup Language
    #[default]
    Dgml,
    /// Graphviz DOT
    Dot,
    /// JSON nodes and links
    Json,
    /// Human-readable summary
    Text,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    /// Whether to use colors (text output only)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Create configuration from CLI arguments
    pub fn from_cli(format: OutputFormat, verbose: bool, quiet: bool, color: bool) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a visualization
    fn format(&self, visualization: &Visualization, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Dgml => Box::new(DgmlFormatter::new()),
        OutputFormat::Dot => Box::new(DotFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraph;
    use crate::update::UpgradeSummary;

    fn empty() -> Visualization {
        Visualization {
            graph: DirectedGraph::dependency_graph(),
            summary: UpgradeSummary::new(),
        }
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Dgml);
    }

    #[test]
    fn test_output_format_value_names() {
        assert_eq!(OutputFormat::from_str("dot", true).unwrap(), OutputFormat::Dot);
        assert_eq!(OutputFormat::from_str("JSON", true).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("xml", true).is_err());
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Dgml);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli_quiet_wins() {
        let config = OutputConfig::from_cli(OutputFormat::Text, true, true, false);
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert!(!config.color);
    }

    #[test]
    fn test_output_config_from_cli_verbose() {
        let config = OutputConfig::from_cli(OutputFormat::Json, true, false, true);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn test_create_formatter_every_format() {
        for format in OutputFormat::value_variants() {
            let formatter = create_formatter(OutputConfig::new(*format, Verbosity::Normal));
            let mut buf = Vec::new();
            formatter.format(&empty(), &mut buf).unwrap();
            assert!(!buf.is_empty(), "{:?} wrote nothing", format);
        }
    }
}
