//! Loading a catalog from a remote package feed
//!
//! Every package id of the feed is fetched with bounded concurrency; the
//! resulting catalog keeps ids in the order the feed listed them.

use super::{CandidatePolicy, InMemoryCatalog};
use crate::domain::Package;
use crate::error::{CatalogError, RegistryError};
use crate::progress::Progress;
use crate::registry::PackageFeed;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Fetch every package of `feed` into an in-memory catalog
pub async fn load_from_feed(
    feed: Arc<dyn PackageFeed>,
    policy: CandidatePolicy,
    concurrency: usize,
    progress: &mut Progress,
) -> Result<InMemoryCatalog, CatalogError> {
    progress.listing(feed.feed_name());
    let ids = feed.list_package_ids().await;
    progress.clear();
    let ids = ids?;

    let packages = fetch_all(feed, ids, concurrency, progress).await?;
    Ok(InMemoryCatalog::from_packages(packages).with_policy(policy))
}

/// Fetch the given package ids, returning their versions in id order
pub async fn fetch_all(
    feed: Arc<dyn PackageFeed>,
    ids: Vec<String>,
    concurrency: usize,
    progress: &mut Progress,
) -> Result<Vec<Package>, CatalogError> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();
    let total = ids.len();

    for (index, id) in ids.into_iter().enumerate() {
        let feed = Arc::clone(&feed);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| CatalogError::lookup(&id, e.to_string()))?;
            let result = feed.fetch_packages(&id).await;
            Ok::<_, CatalogError>((index, id, result))
        });
    }

    progress.fetching(total);
    let mut fetched: Vec<Option<Vec<Package>>> = vec![None; total];

    while let Some(joined) = tasks.join_next().await {
        let (index, id, result) = joined.map_err(|e| CatalogError::lookup("", e.to_string()))??;
        progress.fetched(&id);
        match result {
            Ok(packages) => {
                debug!(package = %id, versions = packages.len(), "loaded");
                fetched[index] = Some(packages);
            }
            // Listed by search but removed since
            Err(RegistryError::PackageNotFound { .. }) => {
                warn!(package = %id, "package listed by search has no registration");
            }
            Err(e) => {
                tasks.abort_all();
                progress.clear();
                return Err(e.into());
            }
        }
    }
    progress.clear();

    Ok(fetched.into_iter().flatten().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::parse_version;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FakeFeed {
        packages: Vec<Package>,
        broken: Option<String>,
    }

    impl FakeFeed {
        fn new(packages: Vec<Package>) -> Self {
            Self {
                packages,
                broken: None,
            }
        }
    }

    #[async_trait]
    impl PackageFeed for FakeFeed {
        fn feed_name(&self) -> &str {
            "fake"
        }

        async fn list_package_ids(&self) -> Result<Vec<String>, RegistryError> {
            let mut ids: Vec<String> = Vec::new();
            for package in &self.packages {
                if !ids.contains(&package.id) {
                    ids.push(package.id.clone());
                }
            }
            ids.push("Ghost".to_string());
            Ok(ids)
        }

        async fn fetch_packages(&self, package_id: &str) -> Result<Vec<Package>, RegistryError> {
            if self.broken.as_deref() == Some(package_id) {
                return Err(RegistryError::network_error(package_id, "fake", "boom"));
            }
            if package_id == "Ghost" {
                return Err(RegistryError::package_not_found(package_id, "fake"));
            }
            if package_id == "A" {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            Ok(self
                .packages
                .iter()
                .filter(|p| p.id == package_id)
                .cloned()
                .collect())
        }
    }

    fn package(id: &str, version: &str) -> Package {
        Package::new(id, parse_version(version).unwrap())
    }

    fn sample() -> Vec<Package> {
        vec![
            package("A", "1.0.0"),
            package("B", "1.0.0"),
            package("B", "2.0.0-rc.1"),
            package("C", "3.0.0"),
        ]
    }

    #[tokio::test]
    async fn test_load_from_feed_keeps_feed_order() {
        let feed: Arc<dyn PackageFeed> = Arc::new(FakeFeed::new(sample()));
        let catalog = load_from_feed(
            feed,
            CandidatePolicy::default(),
            2,
            &mut Progress::disabled(),
        )
        .await
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.version_count(), 4);
        let names: Vec<String> = catalog
            .list_most_recent_packages()
            .unwrap()
            .iter()
            .map(Package::full_name)
            .collect();
        assert_eq!(names, vec!["A 1.0.0", "B 2.0.0-rc.1", "C 3.0.0"]);
    }

    #[tokio::test]
    async fn test_load_from_feed_applies_policy() {
        let feed: Arc<dyn PackageFeed> = Arc::new(FakeFeed::new(sample()));
        let catalog = load_from_feed(
            feed,
            CandidatePolicy::stable_only(),
            1,
            &mut Progress::disabled(),
        )
        .await
        .unwrap();

        let best = catalog.find_best_candidate("B").unwrap().unwrap();
        assert_eq!(best.full_name(), "B 1.0.0");
    }

    #[tokio::test]
    async fn test_load_from_feed_propagates_errors() {
        let mut fake = FakeFeed::new(sample());
        fake.broken = Some("B".to_string());
        let feed: Arc<dyn PackageFeed> = Arc::new(fake);

        let err = load_from_feed(
            feed,
            CandidatePolicy::default(),
            4,
            &mut Progress::disabled(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CatalogError::Registry(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_zero_concurrency_still_progresses() {
        let feed: Arc<dyn PackageFeed> = Arc::new(FakeFeed::new(sample()));
        let packages = fetch_all(
            feed,
            vec!["C".to_string(), "A".to_string()],
            0,
            &mut Progress::disabled(),
        )
        .await
        .unwrap();
        let names: Vec<String> = packages.iter().map(Package::full_name).collect();
        assert_eq!(names, vec!["C 3.0.0", "A 1.0.0"]);
    }
}
