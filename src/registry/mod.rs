//! Package feed adapters
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - NuGet v3 feed adapter (service index, search, registrations)

mod client;
mod nuget;

pub use client::HttpClient;
pub use nuget::NuGetFeed;

use crate::domain::Package;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for remote package feeds
#[async_trait]
pub trait PackageFeed: Send + Sync {
    /// Human-readable feed name used in errors and logs
    fn feed_name(&self) -> &str;

    /// Ids of every package in the feed, without duplicates
    async fn list_package_ids(&self) -> Result<Vec<String>, RegistryError>;

    /// Every published version of a package
    async fn fetch_packages(&self, package_id: &str) -> Result<Vec<Package>, RegistryError>;
}
