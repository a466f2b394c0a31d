//! Restricted-link resolution through a premium link service.
//!
//! Given one of the mirror links found by the orchestrator, the resolver asks
//! the service for a direct download URL.

mod real_debrid;

pub use real_debrid::RealDebridClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A direct download produced by the link service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrestrictedLink {
    pub id: String,
    pub filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub filesize: u64,
    /// Hoster domain of the original link.
    #[serde(default)]
    pub host: String,
    /// Direct download URL.
    pub download: String,
}

/// Errors from the link service.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The service rejected the request.
    #[error("link service error {status} ({code:?}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// Resolver is missing required configuration.
    #[error("resolver not configured: {0}")]
    NotConfigured(String),

    /// Transport failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Turns a hoster link into a direct download.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Service name for logs and responses.
    fn name(&self) -> &str;

    async fn unrestrict(&self, link: &str) -> Result<UnrestrictedLink, ResolverError>;
}
