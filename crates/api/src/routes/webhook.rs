use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::webhook;
use crate::state::AppState;

/// Build the `/webhook` route tree.
///
/// ```text
/// POST /receiver      GitHub webhook delivery
/// GET  /events        ten most recent events, newest first
/// GET  /ui            polling dashboard page
/// ```
///
/// Receiver bodies above `max_body_bytes` are rejected with `INVALID_BODY`.
pub fn router(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/receiver",
            post(webhook::receive_webhook).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .route("/events", get(webhook::list_events))
        .route("/ui", get(webhook::dashboard))
}
