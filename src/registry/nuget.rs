//! NuGet v3 feed adapter
//!
//! Discovers the search and registration resources from a feed's service
//! index, enumerates package ids through paged search and reads every
//! version of a package from its registration index.
//! API reference: https://learn.microsoft.com/nuget/api/overview

use crate::domain::{
    parse_version, DependencyGroup, Package, PackageDependency, TargetFramework, VersionSpec,
};
use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageFeed};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use indexmap::IndexSet;
use serde::Deserialize;
use tracing::{debug, warn};

/// Number of search results requested per page
const SEARCH_PAGE_SIZE: usize = 50;

/// Search resource type prefix
const SEARCH_RESOURCE: &str = "SearchQueryService";

/// Registration resource types, most preferred first
const REGISTRATION_RESOURCES: &[&str] = &[
    "RegistrationsBaseUrl/3.6.0",
    "RegistrationsBaseUrl/3.4.0",
    "RegistrationsBaseUrl",
];

/// Unlisted packages carry this publish year on nuget.org
const UNLISTED_PUBLISH_YEAR: i32 = 1900;

/// NuGet v3 feed adapter
pub struct NuGetFeed {
    client: HttpClient,
    source: String,
    search_url: String,
    registrations_url: String,
}

#[derive(Debug, Deserialize)]
struct ServiceIndex {
    resources: Vec<ServiceResource>,
}

#[derive(Debug, Deserialize)]
struct ServiceResource {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    resource_type: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RegistrationIndex {
    items: Vec<RegistrationPage>,
}

#[derive(Debug, Deserialize)]
struct RegistrationPage {
    #[serde(rename = "@id")]
    id: String,
    /// Absent when the page has to be fetched separately
    items: Option<Vec<RegistrationLeaf>>,
}

#[derive(Debug, Deserialize)]
struct RegistrationLeaf {
    #[serde(rename = "catalogEntry")]
    catalog_entry: CatalogEntry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    id: String,
    version: String,
    #[serde(default)]
    listed: Option<bool>,
    #[serde(default)]
    published: Option<String>,
    #[serde(default)]
    dependency_groups: Vec<RawDependencyGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDependencyGroup {
    #[serde(default)]
    target_framework: Option<String>,
    #[serde(default)]
    dependencies: Option<Vec<RawDependency>>,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    id: String,
    #[serde(default)]
    range: Option<String>,
}

impl NuGetFeed {
    /// Read the service index at `source` and locate the required resources
    pub async fn connect(client: HttpClient, source: &str) -> Result<Self, RegistryError> {
        let index: ServiceIndex = client.get_json(source, "", source).await?;
        let (search_url, registrations_url) = locate_resources(source, &index)?;
        debug!(source, %search_url, %registrations_url, "resolved feed resources");
        Ok(Self::from_resources(client, source, search_url, registrations_url))
    }

    /// Create a feed from already known resource URLs
    pub fn from_resources(
        client: HttpClient,
        source: impl Into<String>,
        search_url: impl Into<String>,
        registrations_url: impl Into<String>,
    ) -> Self {
        let mut registrations_url = registrations_url.into();
        if !registrations_url.ends_with('/') {
            registrations_url.push('/');
        }
        Self {
            client,
            source: source.into(),
            search_url: search_url.into(),
            registrations_url,
        }
    }

    fn search_page_url(&self, skip: usize) -> String {
        format!(
            "{}?q=&skip={}&take={}&prerelease=true&semVerLevel=2.0.0",
            self.search_url, skip, SEARCH_PAGE_SIZE
        )
    }

    fn registration_index_url(&self, package_id: &str) -> String {
        format!(
            "{}{}/index.json",
            self.registrations_url,
            package_id.to_lowercase()
        )
    }
}

#[async_trait]
impl PackageFeed for NuGetFeed {
    fn feed_name(&self) -> &str {
        &self.source
    }

    async fn list_package_ids(&self) -> Result<Vec<String>, RegistryError> {
        let mut ids = IndexSet::new();
        let mut skip = 0;

        loop {
            let url = self.search_page_url(skip);
            let page: SearchResponse = self.client.get_json(&url, "", &self.source).await?;
            if page.data.is_empty() {
                break;
            }
            skip += page.data.len();
            ids.extend(page.data.into_iter().map(|result| result.id));
        }

        debug!(source = %self.source, count = ids.len(), "enumerated package ids");
        Ok(ids.into_iter().collect())
    }

    async fn fetch_packages(&self, package_id: &str) -> Result<Vec<Package>, RegistryError> {
        let url = self.registration_index_url(package_id);
        let index: RegistrationIndex = self
            .client
            .get_json(&url, package_id, &self.source)
            .await?;

        let mut packages = Vec::new();
        for page in index.items {
            let leaves = match page.items {
                Some(leaves) => leaves,
                None => {
                    let page: RegistrationPageItems = self
                        .client
                        .get_json(&page.id, package_id, &self.source)
                        .await?;
                    page.items
                }
            };
            packages.extend(
                leaves
                    .into_iter()
                    .filter_map(|leaf| package_from_entry(leaf.catalog_entry)),
            );
        }

        debug!(package_id, versions = packages.len(), "fetched registrations");
        Ok(packages)
    }
}

#[derive(Debug, Deserialize)]
struct RegistrationPageItems {
    items: Vec<RegistrationLeaf>,
}

fn locate_resources(source: &str, index: &ServiceIndex) -> Result<(String, String), RegistryError> {
    let search = find_resource(index, &[SEARCH_RESOURCE])
        .ok_or_else(|| RegistryError::missing_resource(source, SEARCH_RESOURCE))?;
    let registrations = find_resource(index, REGISTRATION_RESOURCES)
        .ok_or_else(|| RegistryError::missing_resource(source, "RegistrationsBaseUrl"))?;
    Ok((search, registrations))
}

// Exact type matches in preference order win over versioned variants of a bare type
fn find_resource(index: &ServiceIndex, preferred: &[&str]) -> Option<String> {
    preferred
        .iter()
        .find_map(|wanted| {
            index
                .resources
                .iter()
                .find(|r| r.resource_type == *wanted)
        })
        .or_else(|| {
            preferred.iter().find_map(|wanted| {
                let versioned = format!("{}/", wanted);
                index
                    .resources
                    .iter()
                    .find(|r| r.resource_type.starts_with(&versioned))
            })
        })
        .map(|r| r.id.clone())
}

fn package_from_entry(entry: CatalogEntry) -> Option<Package> {
    let version = match parse_version(&entry.version) {
        Ok(version) => version,
        Err(e) => {
            warn!(package = %entry.id, error = %e, "skipping version");
            return None;
        }
    };

    let published = entry
        .published
        .as_deref()
        .and_then(|p| DateTime::parse_from_rfc3339(p).ok())
        .map(|p| p.with_timezone(&Utc));
    let listed = entry.listed.unwrap_or(true)
        && published.is_none_or(|p| p.year() != UNLISTED_PUBLISH_YEAR);

    let mut package = Package::new(&entry.id, version);
    package.listed = listed;
    package.published = published;

    for group in entry.dependency_groups {
        let dependencies = group
            .dependencies
            .unwrap_or_default()
            .into_iter()
            .filter_map(|dep| {
                let range = dep.range.as_deref().unwrap_or_default();
                match range.parse::<VersionSpec>() {
                    Ok(spec) => Some(PackageDependency::new(dep.id, spec)),
                    Err(e) => {
                        warn!(package = %package, dependency = %dep.id, error = %e, "skipping dependency");
                        None
                    }
                }
            })
            .collect();
        let group = match group.target_framework.as_deref().map(str::trim) {
            Some(framework) if !framework.is_empty() => {
                DependencyGroup::for_framework(TargetFramework::new(framework), dependencies)
            }
            _ => DependencyGroup::new(dependencies),
        };
        package.dependency_groups.push(group);
    }

    Some(package)
}
