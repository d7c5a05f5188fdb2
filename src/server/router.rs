use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.config().input.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        // echo, transpose (or invert), flatten, sum, multiply
        .route("/{operation}", post(handlers::evaluate))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}
