//! Health check handler.

use axum::{extract::State, http::StatusCode, Json};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports database and cache health.
///
/// # Endpoint
///
/// `GET /health`
///
/// Returns 200 when the database answers; cache trouble only degrades the
/// body (the service keeps working without its accelerator).
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = sqlx::query("SELECT 1")
        .execute(state.db.as_ref())
        .await
        .is_ok();
    let cache = state.cache.health_check().await;

    let status = if database { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status,
        Json(HealthResponse {
            status: if database { "ok" } else { "degraded" },
            database,
            cache,
        }),
    )
}
