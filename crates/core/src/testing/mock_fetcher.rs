//! Mock page fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, PageFetcher, RawPage};

/// Scripted reply for one URL.
#[derive(Debug, Clone)]
enum Reply {
    Page(String),
    Error(FetchError),
    Redirect(String),
}

/// Mock implementation of the PageFetcher trait.
///
/// Pages and failures are scripted per URL; any other URL answers with a
/// 404 `HttpStatus` error. Every requested URL is recorded in order.
#[derive(Debug, Default)]
pub struct MockFetcher {
    replies: Arc<RwLock<HashMap<String, Reply>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub async fn set_page(&self, url: &str, body: impl Into<String>) {
        self.replies
            .write()
            .await
            .insert(url.to_string(), Reply::Page(body.into()));
    }

    /// Fail every request for `url` with `error`.
    pub async fn set_error(&self, url: &str, error: FetchError) {
        self.replies
            .write()
            .await
            .insert(url.to_string(), Reply::Error(error));
    }

    /// Answer `url` with the page scripted for `target`, reporting `target`
    /// as the final URL.
    pub async fn set_redirect(&self, url: &str, target: &str) {
        self.replies
            .write()
            .await
            .insert(url.to_string(), Reply::Redirect(target.to_string()));
    }

    /// URLs requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    pub async fn clear_requests(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, FetchError> {
        self.requests.write().await.push(url.to_string());

        let replies = self.replies.read().await;
        let (final_url, reply) = match replies.get(url) {
            Some(Reply::Redirect(target)) => (target.as_str(), replies.get(target)),
            reply => (url, reply),
        };

        match reply {
            Some(Reply::Page(body)) => Ok(RawPage {
                url: final_url.to_string(),
                status: 200,
                body: body.clone(),
            }),
            Some(Reply::Error(e)) => Err(e.clone()),
            _ => Err(FetchError::HttpStatus {
                status: 404,
                url: final_url.to_string(),
            }),
        }
    }
}
