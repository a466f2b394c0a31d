//! Real-Debrid API client.
//!
//! Uses the REST API with a private token sent as a bearer header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{LinkResolver, ResolverError, UnrestrictedLink};
use crate::config::ResolverConfig;

/// Error payload returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    error_code: Option<i64>,
}

/// Real-Debrid API client.
pub struct RealDebridClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RealDebridClient {
    /// Create a new client.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolverError> {
        if config.api_key.trim().is_empty() {
            return Err(ResolverError::NotConfigured(
                "Real-Debrid API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl LinkResolver for RealDebridClient {
    fn name(&self) -> &str {
        "real-debrid"
    }

    async fn unrestrict(&self, link: &str) -> Result<UnrestrictedLink, ResolverError> {
        let url = format!("{}/unrestrict/link", self.base_url);

        debug!("Real-Debrid unrestrict: link='{}'", link);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .form(&[("link", link)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(err) => ResolverError::Api {
                    status: status.as_u16(),
                    code: err.error_code,
                    message: err.error,
                },
                Err(_) => ResolverError::Api {
                    status: status.as_u16(),
                    code: None,
                    message: body,
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            ResolverError::Parse(format!("Failed to parse unrestrict response: {}", e))
        })
    }
}
