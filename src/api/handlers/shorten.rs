//! Handler for the shorten endpoint.

use axum::{extract::State, Json};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Errors
///
/// Returns 400 on an invalid URL, 503 when the durable store is unreachable
/// (shorten fails loudly on storage errors), and 500 if code generation
/// exhausts its attempt budget.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let url = state
        .shorten
        .create_short_url(payload.url, payload.expires_at)
        .await?;

    Ok(Json(ShortenResponse::from_entity(url, &state.base_url)))
}
