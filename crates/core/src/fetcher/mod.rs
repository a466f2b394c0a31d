//! Page retrieval.
//!
//! The `PageFetcher` trait is the only network seam of the scraping pipeline.
//! `HttpFetcher` is the production implementation; it presents a full browser
//! fingerprint because the catalog site answers plain clients with an
//! anti-bot challenge page instead of content.

mod http;
mod profile;

pub use http::{looks_like_challenge, HttpFetcher};

use async_trait::async_trait;
use thiserror::Error;

/// A successfully retrieved page.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Final URL after redirects.
    pub url: String,
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Decoded response body.
    pub body: String,
}

/// Errors that can occur while fetching a page.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Could not connect to the host.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Server answered with an anti-bot challenge instead of content.
    #[error("challenge page returned for {0}")]
    Challenge(String),

    /// Any other transport or decoding failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Retrieves HTML pages. No retries are performed by implementations.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page, failing on timeout, network error or non-2xx status.
    async fn fetch(&self, url: &str) -> Result<RawPage, FetchError>;
}
