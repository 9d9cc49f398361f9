//! HTTP router assembly.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::SharedState};

/// Build the application router.
///
/// `max_upload_bytes` caps request bodies, which bounds multipart uploads.
pub fn router(state: SharedState, max_upload_bytes: usize) -> Router {
    Router::new()
        // Upload form
        .route(
            "/",
            get(handlers::statements::index).post(handlers::statements::upload),
        )
        .route("/download", get(handlers::statements::download))
        // JSON API
        .route(
            "/api/v1/statements/extract",
            post(handlers::statements::extract),
        )
        .route("/health", get(handlers::health::health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        // Request/response tracing for observability
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
