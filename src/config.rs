//! Configuration loading
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, the TOML configuration file, built-in defaults.

use crate::catalog::CandidatePolicy;
use crate::cli::CliArgs;
use crate::domain::TargetFramework;
use crate::error::ConfigError;
use crate::graph::GraphPalette;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "upgraph.toml";

/// Default number of concurrent feed requests
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Contents of a configuration file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// NuGet v3 service index URL
    pub source: Option<String>,
    pub target_framework: Option<String>,
    pub include_prerelease: Option<bool>,
    pub concurrency: Option<usize>,
    pub palette: GraphPalette,
}

impl ConfigFile {
    /// Parse a configuration document; `path` is used in errors only
    pub fn from_toml_str(content: &str, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            path: path.as_ref().to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load `explicit` if given, else `upgraph.toml` in `dir` if it exists, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using configuration file");
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }
}

/// Where packages are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// JSON catalog file
    File(PathBuf),
    /// NuGet v3 service index URL
    Feed(String),
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: CatalogSource,
    pub package: Option<String>,
    pub filter: Option<Regex>,
    pub target_framework: Option<TargetFramework>,
    pub policy: CandidatePolicy,
    pub concurrency: usize,
    pub palette: GraphPalette,
}

impl Settings {
    /// Merge command-line arguments over a configuration file
    pub fn resolve(args: &CliArgs, file: ConfigFile) -> Result<Self, ConfigError> {
        if args.catalog.is_some() && args.source.is_some() {
            return Err(ConfigError::ConflictingOptions {
                message: "--catalog and --source cannot be used together".to_string(),
            });
        }
        if args.package.is_some() && args.filter.is_some() {
            return Err(ConfigError::ConflictingOptions {
                message: "--package and --filter cannot be used together".to_string(),
            });
        }

        let source = match (&args.catalog, &args.source, file.source) {
            (Some(path), _, _) => CatalogSource::File(path.clone()),
            (None, Some(url), _) => CatalogSource::Feed(url.clone()),
            (None, None, Some(url)) => CatalogSource::Feed(url),
            (None, None, None) => return Err(ConfigError::MissingSource),
        };

        let filter = args
            .filter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidFilter {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()?;

        let target_framework = args
            .framework
            .as_deref()
            .or(file.target_framework.as_deref())
            .map(TargetFramework::new);

        let include_prerelease = if args.stable_only {
            false
        } else {
            file.include_prerelease.unwrap_or(true)
        };

        let concurrency = args
            .concurrency
            .or(file.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY)
            .max(1);

        Ok(Self {
            source,
            package: args.package.clone(),
            filter,
            target_framework,
            policy: CandidatePolicy { include_prerelease },
            concurrency,
            palette: file.palette,
        })
    }

    /// Whether a seed package id passes the `--filter` expression
    pub fn selects(&self, package_id: &str) -> bool {
        self.filter
            .as_ref()
            .is_none_or(|filter| filter.is_match(package_id))
    }
}
