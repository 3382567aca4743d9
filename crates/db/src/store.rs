//! PostgreSQL-backed [`EventStore`].

use async_trait::async_trait;
use hooklog_core::error::StoreError;
use hooklog_core::events::{NewRepoEvent, RepoEvent};
use hooklog_core::store::EventStore;

use crate::repositories::RepoEventRepo;
use crate::DbPool;

/// [`EventStore`] writing to the `repo_events` table.
///
/// Cheap to clone; concurrency is handled by the underlying pool.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn insert(&self, event: &NewRepoEvent) -> Result<RepoEvent, StoreError> {
        let id = RepoEventRepo::insert(&self.pool, event)
            .await
            .map_err(StoreError::backend)?;
        tracing::debug!(id, request_id = %event.request_id, action = %event.action, "Event stored");
        Ok(RepoEvent::from_new(id.to_string(), event.clone()))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<RepoEvent>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        RepoEventRepo::list_recent(&self.pool, limit)
            .await
            .map_err(StoreError::backend)?
            .into_iter()
            .map(RepoEvent::try_from)
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(StoreError::backend)
    }
}
