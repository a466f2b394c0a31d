//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a scripted page fetcher and an in-memory link cache, so the full
//! HTTP stack can be exercised without reaching the catalog site.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pkgscout_core::{
    config::{ResolverConfig, ScraperConfig, ServerConfig},
    testing::{MockFetcher, MockResolver},
    Config, LinkCache, LinkOrchestrator, LinkResolver, MemoryCache,
};

/// Re-export fixtures for test convenience
pub use pkgscout_core::testing::fixtures;

/// Catalog root used by every fixture.
pub const BASE_URL: &str = "https://catalog.test/";

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///     fixture.fetcher.set_page("https://catalog.test/?s=gow", fixtures::search_page(&[])).await;
///
///     let response = fixture.get("/api/v1/search?q=gow").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock fetcher - script catalog pages
    pub fetcher: Arc<MockFetcher>,
    /// Link cache behind the orchestrator
    pub cache: Arc<MemoryCache>,
    /// Mock resolver, when enabled
    pub resolver: Option<Arc<MockResolver>>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub retry_after: Option<String>,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default settings.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let fetcher = Arc::new(MockFetcher::new());
        let cache = Arc::new(MemoryCache::new(14_400));

        let config = Config {
            scraper: ScraperConfig {
                base_url: BASE_URL.to_string(),
                ..Default::default()
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
                requests_per_minute: test_config.requests_per_minute,
            },
            resolver: test_config.enable_resolver.then(|| ResolverConfig {
                api_key: "test-token".to_string(),
                base_url: "https://resolver.test".to_string(),
                timeout: 5,
            }),
            ..Default::default()
        };

        let orchestrator = Arc::new(LinkOrchestrator::new(
            &config.scraper,
            fetcher.clone(),
            cache.clone() as Arc<dyn LinkCache>,
        ));

        let resolver = test_config.enable_resolver.then(|| Arc::new(MockResolver::new()));

        let state = Arc::new(pkgscout_server::state::AppState::new(
            config,
            orchestrator,
            resolver
                .clone()
                .map(|r| r as Arc<dyn LinkResolver>),
        ));

        let router = pkgscout_server::api::create_router(state);

        Self {
            router,
            fetcher,
            cache,
            resolver,
        }
    }

    /// Script a detail page and its download page under `slug`.
    pub async fn script_item(&self, slug: &str, size: &str, links: &[&str]) -> String {
        let detail_url = format!("{}{}/", BASE_URL, slug);
        self.fetcher
            .set_page(&detail_url, fixtures::detail_page(size, &format!("/dll-{}/", slug)))
            .await;
        self.fetcher
            .set_page(
                &format!("{}dll-{}/", BASE_URL, slug),
                fixtures::download_page(links),
            )
            .await;
        detail_url
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            retry_after,
            body,
            text,
        }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Per-client budget for search and details
    pub requests_per_minute: u32,
    /// Wire a MockResolver behind /api/v1/unrestrict
    pub enable_resolver: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 1000,
            enable_resolver: false,
        }
    }
}

impl TestConfig {
    /// Create config with the mock resolver enabled.
    pub fn with_resolver() -> Self {
        Self {
            enable_resolver: true,
            ..Default::default()
        }
    }

    /// Create config with a tight rate limit.
    pub fn with_rate_limit(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            ..Default::default()
        }
    }
}
