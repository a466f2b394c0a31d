//! Restricted-link resolver API handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use pkgscout_core::UnrestrictedLink;
use serde::Deserialize;
use tracing::warn;

use super::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UnrestrictRequest {
    pub link: String,
}

/// POST /api/v1/unrestrict
pub async fn unrestrict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UnrestrictRequest>,
) -> Result<Json<UnrestrictedLink>, (StatusCode, Json<ErrorResponse>)> {
    let Some(resolver) = state.resolver() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new("No link resolver configured")),
        ));
    };

    let link = request.link.trim();
    if link.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Field 'link' is required")),
        ));
    }

    match resolver.unrestrict(link).await {
        Ok(unrestricted) => Ok(Json(unrestricted)),
        Err(e) => {
            warn!(resolver = resolver.name(), link = %link, error = %e, "Unrestrict failed");
            Err((StatusCode::BAD_GATEWAY, Json(ErrorResponse::new(e.to_string()))))
        }
    }
}
