//! upgraph - NuGet package upgrade graph CLI tool
//!
//! Reads packages from a JSON catalog or a NuGet v3 feed, classifies every
//! dependency against the newest known versions and writes the resulting
//! graph as DGML, DOT, JSON or a text summary.

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use upgraph::catalog::{load_from_feed, Catalog, InMemoryCatalog};
use upgraph::cli::CliArgs;
use upgraph::config::{CatalogSource, ConfigFile, Settings};
use upgraph::error::{AppError, CatalogError, IoError};
use upgraph::output::{create_formatter, OutputConfig};
use upgraph::progress::Progress;
use upgraph::registry::{HttpClient, NuGetFeed, PackageFeed};
use upgraph::visualize::{visualize_packages, VisualizeOptions, Visualization};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; RUST_LOG overrides the level chosen by flags
fn init_tracing(args: &CliArgs) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let file = ConfigFile::discover(args.config.as_deref(), &cwd)?;
    let settings = Settings::resolve(&args, file)?;

    let mut progress = Progress::new(args.show_progress());
    let catalog = load_catalog(&settings, &mut progress).await?;
    info!(
        packages = catalog.len(),
        versions = catalog.version_count(),
        "catalog loaded"
    );

    let visualization = build(&settings, &catalog)?;

    let output_config = OutputConfig::from_cli(args.format, args.verbose, args.quiet, !args.no_color);
    let formatter = create_formatter(output_config);

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| IoError::write(path, e))?;
            let mut writer = BufWriter::new(file);
            formatter
                .format(&visualization, &mut writer)
                .and_then(|()| writer.flush())
                .map_err(|e| IoError::write(path, e))?;
            info!(path = %path.display(), "graph written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            formatter.format(&visualization, &mut stdout).map_err(IoError::from)?;
            stdout.flush().map_err(IoError::from)?;
        }
    }

    Ok(())
}

async fn load_catalog(
    settings: &Settings,
    progress: &mut Progress,
) -> Result<InMemoryCatalog, AppError> {
    match &settings.source {
        CatalogSource::File(path) => {
            Ok(InMemoryCatalog::from_json_file(path)?.with_policy(settings.policy))
        }
        CatalogSource::Feed(url) => {
            let client = HttpClient::new()?;
            let feed: Arc<dyn PackageFeed> = Arc::new(NuGetFeed::connect(client, url).await?);
            let catalog =
                load_from_feed(feed, settings.policy, settings.concurrency, progress).await?;
            Ok(catalog)
        }
    }
}

/// Pick the seed packages and draw them into one graph
fn build(settings: &Settings, catalog: &InMemoryCatalog) -> Result<Visualization, AppError> {
    let options = VisualizeOptions::new()
        .with_target_framework(settings.target_framework.clone())
        .with_palette(settings.palette.clone());

    let seeds = match &settings.package {
        Some(id) => {
            let package = catalog
                .find_best_candidate(id)?
                .ok_or_else(|| CatalogError::lookup(id, "not found in catalog"))?;
            vec![package]
        }
        None => catalog
            .list_most_recent_packages()?
            .into_iter()
            .filter(|package| settings.selects(&package.id))
            .collect(),
    };

    Ok(visualize_packages(&seeds, catalog, &options)?)
}
