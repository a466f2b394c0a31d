//! Orchestrator lifecycle integration tests.
//!
//! These tests drive the complete cache-aside flow over a scripted fetcher
//! and a real JSON cache file:
//! cache miss -> detail page -> download page -> filter -> save -> cache hit

use std::sync::Arc;

use tempfile::TempDir;

use pkgscout_core::{
    config::ScraperConfig,
    testing::{fixtures, MockFetcher},
    CacheRecord, DetailsSource, FetchError, JsonFileCache, LinkCache, LinkOrchestrator,
    Resolution,
};

const BASE: &str = "https://catalog.test/";
const TTL: u64 = 31_536_000;

/// Test helper wiring an orchestrator to a mock fetcher and a cache file.
struct TestHarness {
    fetcher: Arc<MockFetcher>,
    cache: Arc<JsonFileCache>,
    orchestrator: LinkOrchestrator,
    temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cache = Arc::new(JsonFileCache::new(temp_dir.path().join("games_cache.json"), TTL));
        cache.load();
        Self::with_cache(temp_dir, cache)
    }

    fn with_cache(temp_dir: TempDir, cache: Arc<JsonFileCache>) -> Self {
        let fetcher = Arc::new(MockFetcher::new());
        let scraper = ScraperConfig {
            base_url: BASE.to_string(),
            ignore_domains: vec!["uploadhaven".to_string()],
            ..Default::default()
        };
        let orchestrator = LinkOrchestrator::new(&scraper, fetcher.clone(), cache.clone());

        Self {
            fetcher,
            cache,
            orchestrator,
            temp_dir,
        }
    }

    /// Re-open the same cache file in a fresh harness, as after a restart.
    fn restart(self) -> Self {
        let path = self.cache.path().to_path_buf();
        let cache = Arc::new(JsonFileCache::new(path, TTL));
        cache.load();
        Self::with_cache(self.temp_dir, cache)
    }

    async fn script_item(&self, slug: &str, size: &str, links: &[&str]) {
        let detail_url = format!("{}{}/", BASE, slug);
        let download_url = format!("{}dll-{}/", BASE, slug);
        self.fetcher
            .set_page(&detail_url, fixtures::detail_page(size, &format!("/dll-{}/", slug)))
            .await;
        self.fetcher
            .set_page(&download_url, fixtures::download_page(links))
            .await;
    }
}

#[tokio::test]
async fn test_search_then_details_then_cache_hit() {
    let harness = TestHarness::new();
    harness
        .fetcher
        .set_page(
            "https://catalog.test/?s=god%20of%20war",
            fixtures::search_page(&[("God of War", "https://catalog.test/god-of-war/")]),
        )
        .await;
    harness
        .script_item(
            "god-of-war",
            "37.6 GB",
            &[
                "https://mega.nz/file/1",
                "https://uploadhaven.com/download/2",
                "https://1fichier.com/?3",
                "https://mega.nz/file/1",
            ],
        )
        .await;

    let results = harness.orchestrator.search("god of war").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].size_hint, "N/A");

    let first = harness.orchestrator.details(&results[0]).await;
    assert_eq!(first.status, Resolution::Resolved);
    assert_eq!(first.source, DetailsSource::Live);
    assert_eq!(first.size, "37.6 GB");
    assert_eq!(first.links.len(), 2);
    assert_eq!(harness.fetcher.request_count().await, 3);

    let second = harness.orchestrator.details(&results[0]).await;
    assert_eq!(second.source, DetailsSource::Cache);
    assert_eq!(second.links, first.links);
    assert_eq!(second.metadata, first.metadata);
    assert_eq!(harness.fetcher.request_count().await, 3);
}

#[tokio::test]
async fn test_cached_item_survives_restart() {
    let harness = TestHarness::new();
    harness
        .script_item("bloodborne", "40 GB", &["https://mega.nz/file/bb"])
        .await;
    let item = fixtures::summary("Bloodborne", "https://catalog.test/bloodborne/");

    let live = harness.orchestrator.details(&item).await;
    assert!(live.is_resolved());

    let harness = harness.restart();
    assert_eq!(harness.cache.len(), 1);

    let cached = harness.orchestrator.details(&item).await;
    assert_eq!(cached.source, DetailsSource::Cache);
    assert_eq!(cached.size, "40 GB");
    assert_eq!(cached.links, live.links);
    assert_eq!(harness.fetcher.request_count().await, 0);
}

#[tokio::test]
async fn test_fresh_cache_entry_answers_without_fetch() {
    let harness = TestHarness::new();
    let url = "https://catalog.test/the-last-of-us/";
    harness.cache.insert(fixtures::cache_record(url, 3, 1.0));

    let details = harness
        .orchestrator
        .details(&fixtures::summary("The Last of Us", url))
        .await;

    assert_eq!(details.status, Resolution::Resolved);
    assert_eq!(details.links.len(), 3);
    assert_eq!(harness.fetcher.request_count().await, 0);
}

#[tokio::test]
async fn test_expired_entry_is_refetched_and_replaced() {
    let harness = TestHarness::new();
    let url = "https://catalog.test/uncharted/";
    harness
        .cache
        .insert(fixtures::cache_record(url, 3, TTL as f64 + 10.0));
    harness
        .script_item("uncharted", "50 GB", &["https://mega.nz/file/new"])
        .await;

    let details = harness
        .orchestrator
        .details(&fixtures::summary("Uncharted", url))
        .await;

    assert_eq!(details.source, DetailsSource::Live);
    assert_eq!(details.links.len(), 1);
    assert_eq!(harness.fetcher.request_count().await, 2);

    let record: CacheRecord = harness.cache.get(url).unwrap();
    assert_eq!(record.size, "50 GB");
    assert_eq!(record.links.len(), 1);
}

#[tokio::test]
async fn test_incomplete_entry_is_refetched() {
    let harness = TestHarness::new();
    let url = "https://catalog.test/spiderman/";
    let mut record = fixtures::cache_record(url, 2, 1.0);
    record.metadata.version = "N/A".to_string();
    record.metadata.cusa = "N/A".to_string();
    harness.cache.insert(record);

    let details = harness
        .orchestrator
        .details(&fixtures::summary("Spider-Man", url))
        .await;

    assert_eq!(details.status, Resolution::ResolvedEmpty);
    assert_eq!(harness.fetcher.request_count().await, 1);
}

#[tokio::test]
async fn test_download_page_failure_leaves_cache_untouched() {
    let harness = TestHarness::new();
    let detail_url = "https://catalog.test/horizon/";
    harness
        .fetcher
        .set_page(detail_url, fixtures::detail_page("60 GB", "/dll-horizon/"))
        .await;
    harness
        .fetcher
        .set_error(
            "https://catalog.test/dll-horizon/",
            FetchError::ConnectionFailed("reset by peer".to_string()),
        )
        .await;

    let details = harness
        .orchestrator
        .details(&fixtures::summary("Horizon", detail_url))
        .await;

    assert_eq!(details.status, Resolution::ResolvedEmpty);
    assert_eq!(details.size, "60 GB");
    assert!(harness.cache.is_empty());
    assert!(!harness.cache.path().exists());
}
