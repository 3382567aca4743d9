//! Row model for the `repo_events` table.

use hooklog_core::error::StoreError;
use hooklog_core::events::{EventAction, RepoEvent};
use hooklog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `repo_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepoEventRow {
    pub id: DbId,
    pub request_id: String,
    pub author: String,
    pub action: String,
    pub from_branch: Option<String>,
    pub to_branch: String,
    pub timestamp: String,
    pub received_at: Timestamp,
}

impl TryFrom<RepoEventRow> for RepoEvent {
    type Error = StoreError;

    fn try_from(row: RepoEventRow) -> Result<Self, Self::Error> {
        let action = EventAction::parse(&row.action).ok_or_else(|| StoreError::Corrupt {
            id: row.id.to_string(),
            message: format!("unknown action '{}'", row.action),
        })?;

        Ok(RepoEvent {
            id: row.id.to_string(),
            request_id: row.request_id,
            author: row.author,
            action,
            from_branch: row.from_branch,
            to_branch: row.to_branch,
            timestamp: row.timestamp,
        })
    }
}
