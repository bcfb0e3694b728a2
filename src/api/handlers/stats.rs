//! Handler for per-code click statistics.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the durable record for a code, including its click total.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// Expired links are still reported here; expiry only hides them from the
/// redirect path.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let url = state
        .urls
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    Ok(Json(url.into()))
}
