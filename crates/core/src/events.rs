//! Normalized repository event records.
//!
//! Every supported webhook shape (push, pull request opened, pull request
//! merged) is mapped into the same flat record so the store and the read
//! endpoint never need to know about provider payloads.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EventAction
// ---------------------------------------------------------------------------

/// Classification of a normalized event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    Push,
    PullRequest,
    Merge,
}

impl EventAction {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "PUSH",
            Self::PullRequest => "PULL_REQUEST",
            Self::Merge => "MERGE",
        }
    }

    /// Parse from a wire-format string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PUSH" => Some(Self::Push),
            "PULL_REQUEST" => Some(Self::PullRequest),
            "MERGE" => Some(Self::Merge),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A normalized event that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRepoEvent {
    /// Commit id for pushes, stringified pull request id otherwise.
    pub request_id: String,
    pub author: String,
    pub action: EventAction,
    /// Source branch. Always `None` for pushes.
    pub from_branch: Option<String>,
    pub to_branch: String,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
}

/// A stored event, as returned to readers.
///
/// The store-assigned identifier is always surfaced as a string so the
/// representation does not depend on the backend's key type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEvent {
    pub id: String,
    pub request_id: String,
    pub author: String,
    pub action: EventAction,
    pub from_branch: Option<String>,
    pub to_branch: String,
    pub timestamp: String,
}

impl RepoEvent {
    /// Attach a store-assigned identifier to a new record.
    pub fn from_new(id: impl Into<String>, event: NewRepoEvent) -> Self {
        Self {
            id: id.into(),
            request_id: event.request_id,
            author: event.author,
            action: event.action,
            from_branch: event.from_branch,
            to_branch: event.to_branch,
            timestamp: event.timestamp,
        }
    }
}
