//! Catalog API handlers: search and details.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use pkgscout_core::{
    host_label, CatalogSummary, ItemDetails, Resolution, NOT_AVAILABLE,
};
use serde::{Deserialize, Serialize};

use super::ErrorResponse;
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub results: Vec<CatalogSummary>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsParams {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub size: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    #[serde(flatten)]
    pub details: ItemDetails,
    /// Host label per link, in link order.
    pub hosts: Vec<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/search?q=
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    if params.q.trim().is_empty() {
        return Err(bad_request("Query parameter 'q' is required"));
    }

    let results = state.orchestrator().search(&params.q).await;
    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}

/// GET /api/v1/details?url=&title=&size=
///
/// 404 only when nothing at all was found: no links and no size.
pub async fn details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailsParams>,
) -> Result<Json<DetailsResponse>, ApiError> {
    let url = params.url.trim();
    if url.is_empty() {
        return Err(bad_request("Query parameter 'url' is required"));
    }

    let mut item = CatalogSummary::new(params.title, url);
    if let Some(size) = params.size.filter(|s| !s.trim().is_empty()) {
        item.size_hint = size;
    }

    let details = state.orchestrator().details(&item).await;

    if details.status == Resolution::ResolvedEmpty && details.size == NOT_AVAILABLE {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("No content found or scraping failed")),
        ));
    }

    let hosts = details.links.iter().map(|l| host_label(l.url())).collect();
    Ok(Json(DetailsResponse { details, hosts }))
}
