use std::sync::Arc;

use hooklog_core::store::EventStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Event store shared by every request.
    pub store: Arc<dyn EventStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
