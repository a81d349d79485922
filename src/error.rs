//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionSpecError: Malformed versions and version ranges
//! - CatalogError: Issues resolving packages against a catalog
//! - RegistryError: Issues with NuGet feed communication
//! - ConfigError: Issues with CLI options or the configuration file
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version or version range errors
    #[error(transparent)]
    VersionSpec(#[from] VersionSpecError),

    /// Catalog related errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Package feed related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors raised while parsing versions and version ranges
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionSpecError {
    /// A single version could not be parsed
    #[error("invalid version '{value}': {message}")]
    InvalidVersion { value: String, message: String },

    /// A version range could not be parsed or violates its bounds
    #[error("invalid version range '{value}': {message}")]
    InvalidRange { value: String, message: String },
}

/// Errors related to catalog lookups
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read or parsed
    #[error("invalid catalog {path}: {message}")]
    InvalidCatalog { path: PathBuf, message: String },

    /// A lookup against the catalog failed
    #[error("failed to look up package '{package}': {message}")]
    Lookup { package: String, message: String },

    /// The feed backing the catalog failed
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors related to package feed communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in the feed
    #[error("package '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from the feed
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// The service index does not advertise a required resource
    #[error("{registry} does not provide a {resource} resource")]
    MissingResource { registry: String, resource: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// The package filter is not a valid regular expression
    #[error("invalid package filter '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// Neither a catalog file nor a feed source was given
    #[error("no package source: pass --catalog <FILE> or --source <URL>, or set `source` in the config file")]
    MissingSource,
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to write the rendered graph
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {source}")]
    Generic {
        #[source]
        source: std::io::Error,
    },
}

impl VersionSpecError {
    /// Creates a new InvalidVersion error
    pub fn invalid_version(value: impl Into<String>, message: impl Into<String>) -> Self {
        VersionSpecError::InvalidVersion {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidRange error
    pub fn invalid_range(value: impl Into<String>, message: impl Into<String>) -> Self {
        VersionSpecError::InvalidRange {
            value: value.into(),
            message: message.into(),
        }
    }
}

impl CatalogError {
    /// Creates a new InvalidCatalog error
    pub fn invalid_catalog(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CatalogError::InvalidCatalog {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new Lookup error
    pub fn lookup(package: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Lookup {
            package: package.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new MissingResource error
    pub fn missing_resource(registry: impl Into<String>, resource: impl Into<String>) -> Self {
        RegistryError::MissingResource {
            registry: registry.into(),
            resource: resource.into(),
        }
    }
}

impl IoError {
    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Write {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(source: std::io::Error) -> Self {
        IoError::Generic { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_spec_error_invalid_version() {
        let err = VersionSpecError::invalid_version("1.x", "unexpected character");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version '1.x'"));
        assert!(msg.contains("unexpected character"));
    }

    #[test]
    fn test_version_spec_error_invalid_range() {
        let err = VersionSpecError::invalid_range("[2.0, 1.0]", "minimum exceeds maximum");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version range"));
        assert!(msg.contains("[2.0, 1.0]"));
    }

    #[test]
    fn test_catalog_error_invalid_catalog() {
        let err = CatalogError::invalid_catalog("/path/to/catalog.json", "expected array");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid catalog"));
        assert!(msg.contains("catalog.json"));
    }

    #[test]
    fn test_catalog_error_lookup() {
        let err = CatalogError::lookup("Newtonsoft.Json", "connection reset");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to look up package 'Newtonsoft.Json'"));
    }

    #[test]
    fn test_catalog_error_from_registry_error() {
        let err: CatalogError = RegistryError::timeout("Serilog", "nuget.org").into();
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("Serilog"));
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("nonexistent-package", "nuget.org");
        let msg = format!("{}", err);
        assert!(msg.contains("package 'nonexistent-package' not found"));
        assert!(msg.contains("nuget.org"));
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("NUnit", "nuget.org", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_registry_error_rate_limit() {
        let err = RegistryError::rate_limit_exceeded("nuget.org");
        let msg = format!("{}", err);
        assert!(msg.contains("rate limit exceeded"));
    }

    #[test]
    fn test_registry_error_missing_resource() {
        let err = RegistryError::missing_resource("https://feed/index.json", "SearchQueryService");
        let msg = format!("{}", err);
        assert!(msg.contains("does not provide a SearchQueryService resource"));
    }

    #[test]
    fn test_config_error_conflicting_options() {
        let err = ConfigError::ConflictingOptions {
            message: "--catalog and --source cannot be used together".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("conflicting options"));
    }

    #[test]
    fn test_config_error_missing_source() {
        let msg = format!("{}", ConfigError::MissingSource);
        assert!(msg.contains("--catalog"));
        assert!(msg.contains("--source"));
    }

    #[test]
    fn test_io_error_write() {
        let err = IoError::write(
            "/path/to/graph.dgml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("failed to write"));
        assert!(msg.contains("graph.dgml"));
    }

    #[test]
    fn test_app_error_from_catalog_error() {
        let app_err: AppError = CatalogError::lookup("pkg", "boom").into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("failed to look up package 'pkg'"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::MissingSource.into();
        assert!(matches!(app_err, AppError::Config(_)));
    }

    #[test]
    fn test_app_error_from_version_spec_error() {
        let app_err: AppError = VersionSpecError::invalid_version("x", "bad").into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("invalid version 'x'"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = RegistryError::rate_limit_exceeded("nuget.org");
        let debug = format!("{:?}", err);
        assert!(debug.contains("RateLimitExceeded"));
    }
}
