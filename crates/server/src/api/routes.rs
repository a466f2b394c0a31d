use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::middleware::{metrics_middleware, rate_limit_middleware};
use super::{catalog, handlers, resolver};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Scraping endpoints hit the catalog site, so they are rate limited per client
    let scraping_routes = Router::new()
        .route("/search", get(catalog::search))
        .route("/details", get(catalog::details))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // API routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/unrestrict", post(resolver::unrestrict))
        .merge(scraping_routes);

    Router::new()
        .route("/", get(handlers::home))
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
