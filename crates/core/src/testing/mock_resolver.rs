//! Mock link resolver for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::fixtures;
use crate::resolver::{LinkResolver, ResolverError, UnrestrictedLink};

/// Mock implementation of the LinkResolver trait.
///
/// Answers every link with [`fixtures::unrestricted`] unless an error is
/// queued with [`MockResolver::fail_next`].
#[derive(Debug, Default)]
pub struct MockResolver {
    next_error: Arc<RwLock<Option<ResolverError>>>,
    links: Arc<RwLock<Vec<String>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with `error`.
    pub async fn fail_next(&self, error: ResolverError) {
        *self.next_error.write().await = Some(error);
    }

    /// Links passed to `unrestrict` so far.
    pub async fn recorded_links(&self) -> Vec<String> {
        self.links.read().await.clone()
    }
}

#[async_trait]
impl LinkResolver for MockResolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn unrestrict(&self, link: &str) -> Result<UnrestrictedLink, ResolverError> {
        self.links.write().await.push(link.to_string());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        Ok(fixtures::unrestricted(link))
    }
}
