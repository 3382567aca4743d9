#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use hooklog_core::error::StoreError;
use hooklog_core::events::{NewRepoEvent, RepoEvent};
use hooklog_core::store::{EventStore, MemoryEventStore};
use tower::ServiceExt;

use hooklog_api::config::{ServerConfig, StoreBackend};
use hooklog_api::router::build_app_router;
use hooklog_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        max_body_bytes: 25 * 1024 * 1024,
        store: StoreBackend::Memory,
        database_url: None,
    }
}

/// Build the full application router over the given store, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<dyn EventStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

/// Like [`build_test_app`], with a custom configuration.
pub fn build_test_app_with_config(store: Arc<dyn EventStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router over a fresh in-memory store, returned alongside the store.
pub fn memory_app() -> (Router, Arc<MemoryEventStore>) {
    let store = Arc::new(MemoryEventStore::new());
    (build_test_app(store.clone()), store)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw body to the webhook receiver with an optional event header.
pub async fn post_webhook(app: Router, event_type: Option<&str>, body: &str) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook/receiver")
        .header("content-type", "application/json");
    if let Some(event_type) = event_type {
        builder = builder.header("X-GitHub-Event", event_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_event(
    app: Router,
    event_type: &str,
    payload: serde_json::Value,
) -> Response<Body> {
    post_webhook(app, Some(event_type), &payload.to_string()).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Store that fails every operation after `ok_inserts` successful inserts.
pub struct FailingStore {
    inner: MemoryEventStore,
    ok_inserts: usize,
    inserts: AtomicUsize,
}

impl FailingStore {
    pub fn new(ok_inserts: usize) -> Self {
        Self {
            inner: MemoryEventStore::new(),
            ok_inserts,
            inserts: AtomicUsize::new(0),
        }
    }

    pub async fn stored(&self) -> usize {
        self.inner.len().await
    }
}

fn unavailable() -> StoreError {
    StoreError::backend(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "store unavailable",
    ))
}

#[async_trait]
impl EventStore for FailingStore {
    async fn insert(&self, event: &NewRepoEvent) -> Result<RepoEvent, StoreError> {
        if self.inserts.fetch_add(1, Ordering::SeqCst) >= self.ok_inserts {
            return Err(unavailable());
        }
        self.inner.insert(event).await
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<RepoEvent>, StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
