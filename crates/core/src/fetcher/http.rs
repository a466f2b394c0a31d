//! reqwest-backed page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect, Client};
use tracing::debug;

use crate::config::ScraperConfig;

use super::{FetchError, PageFetcher, RawPage};

/// Markers of the common anti-bot interstitial served with a 200 status.
const CHALLENGE_MARKERS: &[&str] = &[
    "cf-browser-verification",
    "challenge-platform",
    "cf_chl_opt",
    "Just a moment...",
];

/// HTTP page fetcher with a browser-like fingerprint.
///
/// Keeps a cookie jar for its whole lifetime so clearance cookies handed
/// out by the site are replayed on later requests.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new fetcher from the scraper configuration.
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let timeout = Duration::from_secs(config.timeout);
        let client = Client::builder()
            .user_agent(config.client.user_agent())
            .default_headers(config.client.headers())
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(redirect::Policy::limited(10))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, FetchError> {
        debug!(url = %url, "Fetching page");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else if e.is_connect() {
                FetchError::ConnectionFailed(e.to_string())
            } else {
                FetchError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Request(e.to_string())
            }
        })?;

        if looks_like_challenge(&body) {
            return Err(FetchError::Challenge(url.to_string()));
        }

        debug!(url = %url, bytes = body.len(), "Fetched page");

        Ok(RawPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

/// Whether a body is an anti-bot interstitial rather than site content.
pub fn looks_like_challenge(body: &str) -> bool {
    CHALLENGE_MARKERS
        .iter()
        .filter(|marker| body.contains(**marker))
        .count()
        >= 2
}
