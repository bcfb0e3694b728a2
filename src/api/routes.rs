//! Route table.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    health::health_handler, redirect::redirect_handler, shorten::shorten_handler,
    stats::stats_handler,
};
use crate::state::AppState;

/// Builds the application router.
///
/// The catch-all `/{code}` route comes last so fixed routes win.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/shorten", post(shorten_handler))
        .route("/api/stats/{code}", get(stats_handler))
        .route("/{code}", get(redirect_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
