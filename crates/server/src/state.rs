use std::sync::Arc;

use pkgscout_core::{Config, LinkCache, LinkOrchestrator, LinkResolver, SanitizedConfig};

use crate::api::rate_limiter::RateLimiterPool;

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<LinkOrchestrator>,
    resolver: Option<Arc<dyn LinkResolver>>,
    rate_limiter: RateLimiterPool,
}

impl AppState {
    pub fn new(
        config: Config,
        orchestrator: Arc<LinkOrchestrator>,
        resolver: Option<Arc<dyn LinkResolver>>,
    ) -> Self {
        let rate_limiter = RateLimiterPool::new(config.server.requests_per_minute);
        Self {
            config,
            orchestrator,
            resolver,
            rate_limiter,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn orchestrator(&self) -> &LinkOrchestrator {
        &self.orchestrator
    }

    pub fn cache(&self) -> &dyn LinkCache {
        self.orchestrator.cache().as_ref()
    }

    pub fn resolver(&self) -> Option<&dyn LinkResolver> {
        self.resolver.as_deref()
    }

    pub fn rate_limiter(&self) -> &RateLimiterPool {
        &self.rate_limiter
    }
}
