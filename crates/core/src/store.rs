//! Event store abstraction.
//!
//! Handlers talk to persistence only through [`EventStore`], held as an
//! `Arc<dyn EventStore>` in the application state. The PostgreSQL
//! implementation lives in `hooklog-db`; [`MemoryEventStore`] backs tests and
//! database-less local runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::events::{NewRepoEvent, RepoEvent};

/// Number of events returned by the read endpoint.
pub const RECENT_EVENTS_LIMIT: usize = 10;

/// Append-only storage of normalized events.
///
/// Implementations must be safe for concurrent inserts and reads. Inserts are
/// not deduplicated: delivering the same webhook twice stores it twice.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append one event and return it with its assigned identifier.
    async fn insert(&self, event: &NewRepoEvent) -> Result<RepoEvent, StoreError>;

    /// Return up to `limit` events ordered by timestamp, newest first.
    ///
    /// Events with equal timestamps are returned newest insertion first.
    async fn recent(&self, limit: usize) -> Result<Vec<RepoEvent>, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-process [`EventStore`] keeping events in insertion order.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<RepoEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn insert(&self, event: &NewRepoEvent) -> Result<RepoEvent, StoreError> {
        let mut events = self.events.write().await;
        let stored = RepoEvent::from_new((events.len() + 1).to_string(), event.clone());
        events.push(stored.clone());
        Ok(stored)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<RepoEvent>, StoreError> {
        let events = self.events.read().await;
        let mut newest_first: Vec<RepoEvent> = events.iter().rev().cloned().collect();
        // Stable sort keeps newest insertion first among equal timestamps.
        newest_first.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        newest_first.truncate(limit);
        Ok(newest_first)
    }
}
