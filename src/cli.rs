//! CLI argument parsing module for upgraph

use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Parse a concurrency limit, which must be at least 1
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if n == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(n)
}

/// Visualize upgradeable NuGet package dependencies as a directed graph
#[derive(Parser, Debug, Clone)]
#[command(
    name = "upgraph",
    version,
    about = "Visualize upgradeable NuGet package dependencies"
)]
pub struct CliArgs {
    // Package source
    /// Read packages from a JSON catalog file
    #[arg(long, value_name = "FILE", conflicts_with = "source")]
    pub catalog: Option<PathBuf>,

    /// Read packages from a NuGet v3 feed (service index URL)
    #[arg(long, value_name = "URL")]
    pub source: Option<String>,

    // Selection
    /// Visualize a single package instead of the whole catalog
    #[arg(short, long, value_name = "ID")]
    pub package: Option<String>,

    /// Only visualize packages whose id matches this regular expression
    #[arg(long, value_name = "REGEX", conflicts_with = "package")]
    pub filter: Option<String>,

    /// Only follow dependencies compatible with this target framework (e.g. net8.0)
    #[arg(long, value_name = "TFM")]
    pub framework: Option<String>,

    /// Prefer release versions when choosing candidates
    #[arg(long)]
    pub stable_only: bool,

    // Output options
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dgml)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Disable colored text output
    #[arg(long)]
    pub no_color: bool,

    // General options
    /// Configuration file (default: ./upgraph.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of concurrent feed requests
    #[arg(long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Whether progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
