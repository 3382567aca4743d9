//! Handlers for GitHub webhook delivery and the event feed.
//!
//! Webhook deliveries are not authenticated and never retried here; a failed
//! delivery is logged with its raw payload and reported back with `500` so
//! the sender can redeliver it.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use hooklog_core::events::RepoEvent;
use hooklog_core::normalizer::{self, Normalized, DEFAULT_EVENT_TYPE};
use hooklog_core::store::RECENT_EVENTS_LIMIT;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Header naming the webhook event type.
pub const GITHUB_EVENT_HEADER: &str = "x-github-event";

/// Header carrying the unique delivery id.
pub const GITHUB_DELIVERY_HEADER: &str = "x-github-delivery";

/// Static dashboard page polling [`list_events`].
const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

// ---------------------------------------------------------------------------
// Receiver
// ---------------------------------------------------------------------------

/// POST /webhook/receiver
///
/// Normalize a webhook and store the resulting events.
///
/// - `200` with a plain-text confirmation when the event is recognized.
/// - `204` when the event type or pull request action is not recorded.
/// - `500` with `{"error": ...}` for unreadable or oversized bodies, invalid
///   JSON, malformed payloads and store failures. Events stored before a
///   store failure are kept.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    let event_type = header_str(&headers, GITHUB_EVENT_HEADER).unwrap_or(DEFAULT_EVENT_TYPE);
    let delivery_id = header_str(&headers, GITHUB_DELIVERY_HEADER);

    let body = body.map_err(|rejection| {
        let err = AppError::InvalidBody(rejection.body_text());
        tracing::error!(
            event_type,
            delivery_id,
            code = err.code(),
            error = %err,
            "Webhook body could not be read",
        );
        err
    })?;

    let result = process_delivery(&state, event_type, delivery_id, &body).await;

    if let Err(err) = &result {
        tracing::error!(
            event_type,
            delivery_id,
            code = err.code(),
            error = %err,
            payload = %String::from_utf8_lossy(&body),
            "Webhook delivery failed",
        );
    }

    result
}

async fn process_delivery(
    state: &AppState,
    event_type: &str,
    delivery_id: Option<&str>,
    body: &[u8],
) -> AppResult<Response> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidJson(e.to_string()))?;

    tracing::info!(event_type, delivery_id, %payload, "Webhook received");

    let events = match normalizer::normalize(event_type, &payload)? {
        Normalized::Ignored(reason) => {
            tracing::info!(event_type, delivery_id, %reason, "Webhook ignored");
            return Ok(StatusCode::NO_CONTENT.into_response());
        }
        Normalized::Events(events) => events,
    };

    for event in &events {
        let stored = state.store.insert(event).await?;
        tracing::info!(
            id = %stored.id,
            request_id = %stored.request_id,
            action = %stored.action,
            author = %stored.author,
            to_branch = %stored.to_branch,
            "Event saved",
        );
    }

    Ok((
        StatusCode::OK,
        format!("Webhook processed: {} event(s) stored", events.len()),
    )
        .into_response())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

// ---------------------------------------------------------------------------
// Read side
// ---------------------------------------------------------------------------

/// GET /webhook/events
///
/// The ten most recent events, newest first, as a bare JSON array.
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<RepoEvent>>> {
    let events = state.store.recent(RECENT_EVENTS_LIMIT).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load recent events");
        AppError::from(e)
    })?;
    Ok(Json(events))
}

/// GET /webhook/ui
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
