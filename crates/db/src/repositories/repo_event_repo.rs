//! Repository for the `repo_events` table.

use hooklog_core::events::NewRepoEvent;
use hooklog_core::types::DbId;
use sqlx::PgPool;

use crate::models::repo_event::RepoEventRow;

/// Column list for `repo_events` queries.
const COLUMNS: &str =
    "id, request_id, author, action, from_branch, to_branch, \"timestamp\", received_at";

/// Provides append and read operations for normalized events.
pub struct RepoEventRepo;

impl RepoEventRepo {
    /// Insert a new event row, returning the generated ID.
    pub async fn insert(pool: &PgPool, event: &NewRepoEvent) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO repo_events \
                (request_id, author, action, from_branch, to_branch, \"timestamp\") \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&event.request_id)
        .bind(&event.author)
        .bind(event.action.as_str())
        .bind(event.from_branch.as_deref())
        .bind(&event.to_branch)
        .bind(&event.timestamp)
        .fetch_one(pool)
        .await
    }

    /// List the most recent events, newest timestamp first.
    ///
    /// Ties on `timestamp` fall back to the newest row.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<RepoEventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM repo_events ORDER BY \"timestamp\" DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, RepoEventRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List every stored row for a provider request id, oldest first.
    pub async fn list_by_request_id(
        pool: &PgPool,
        request_id: &str,
    ) -> Result<Vec<RepoEventRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM repo_events WHERE request_id = $1 ORDER BY id");
        sqlx::query_as::<_, RepoEventRow>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }
}
