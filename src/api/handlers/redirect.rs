//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Cache-aside resolution (cache hit, or durable lookup + cache populate)
/// 2. Click buffered in the cache (fire-and-forget)
/// 3. Access event published (fire-and-forget)
/// 4. 302 Found with `Location`
///
/// Steps 2 and 3 swallow their own failures; only resolution decides the
/// response. Absent and expired codes return 404 — the redirect fails closed
/// when validity cannot be proven.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = state.resolver.resolve(&code).await?;

    state.tracker.record_hit(&code).await;
    state.publisher.publish(&code).await;

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response())
}
