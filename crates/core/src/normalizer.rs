//! Webhook payload normalization.
//!
//! Maps a GitHub webhook (event type header + JSON body) to zero or more
//! [`NewRepoEvent`] records. The mapping is pure; the receipt clock is passed
//! in by [`normalize_at`] so callers and tests control it.
//!
//! Only the fields the mapping reads are modelled. Each one is optional in
//! the schema and checked explicitly, so a missing field is reported as a
//! [`PayloadError`] naming the field instead of a generic decode failure.

use serde::Deserialize;
use serde_json::Value;

use crate::error::PayloadError;
use crate::events::{EventAction, NewRepoEvent};
use crate::types::{format_receipt_timestamp, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Event type of branch pushes.
pub const EVENT_PUSH: &str = "push";

/// Event type of pull request activity.
pub const EVENT_PULL_REQUEST: &str = "pull_request";

/// Event type assumed when the sender does not name one.
pub const DEFAULT_EVENT_TYPE: &str = "ping";

/// Pull request sub-action recorded as [`EventAction::PullRequest`].
pub const PR_ACTION_OPENED: &str = "opened";

/// Pull request sub-action recorded as [`EventAction::Merge`] when merged.
pub const PR_ACTION_CLOSED: &str = "closed";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of normalizing a well-formed webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// A recognized event. May be empty (a push without commits).
    Events(Vec<NewRepoEvent>),
    /// Understood, but intentionally not recorded.
    Ignored(IgnoreReason),
}

/// Why a webhook was not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    UnsupportedEventType(String),
    UnsupportedPullRequestAction(String),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedEventType(t) => write!(f, "unsupported event type '{t}'"),
            Self::UnsupportedPullRequestAction(a) => {
                write!(f, "unsupported pull_request action '{a}'")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Partial payload schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PushPayload {
    pusher: Option<Pusher>,
    #[serde(rename = "ref")]
    git_ref: Option<String>,
    commits: Option<Vec<CommitPayload>>,
}

#[derive(Debug, Deserialize)]
struct Pusher {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    id: Option<String>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestEnvelope {
    action: Option<String>,
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    id: Option<Value>,
    user: Option<UserPayload>,
    head: Option<BranchRef>,
    base: Option<BranchRef>,
    merged: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BranchRef {
    #[serde(rename = "ref")]
    git_ref: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Normalize a webhook using the current time as the receipt time.
pub fn normalize(event_type: &str, payload: &Value) -> Result<Normalized, PayloadError> {
    normalize_at(event_type, payload, chrono::Utc::now())
}

/// Normalize a webhook received at `received_at`.
///
/// - `push` yields one [`EventAction::Push`] record per commit.
/// - `pull_request` yields one record when opened or closed-as-merged, and is
///   ignored for every other sub-action.
/// - Any other event type is ignored whatever the payload looks like.
pub fn normalize_at(
    event_type: &str,
    payload: &Value,
    received_at: Timestamp,
) -> Result<Normalized, PayloadError> {
    match event_type {
        EVENT_PUSH => normalize_push(payload).map(Normalized::Events),
        EVENT_PULL_REQUEST => normalize_pull_request(payload, received_at),
        other => Ok(Normalized::Ignored(IgnoreReason::UnsupportedEventType(
            other.to_string(),
        ))),
    }
}

fn normalize_push(payload: &Value) -> Result<Vec<NewRepoEvent>, PayloadError> {
    let push = decode::<PushPayload>(EVENT_PUSH, payload)?;

    let author = required(
        EVENT_PUSH,
        "pusher.name",
        push.pusher.and_then(|p| p.name),
    )?;
    let git_ref = required(EVENT_PUSH, "ref", push.git_ref)?;
    let to_branch = branch_from_ref(&git_ref).to_string();

    push.commits
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, commit)| -> Result<NewRepoEvent, PayloadError> {
            Ok(NewRepoEvent {
                request_id: required(EVENT_PUSH, &format!("commits[{i}].id"), commit.id)?,
                author: author.clone(),
                action: EventAction::Push,
                from_branch: None,
                to_branch: to_branch.clone(),
                timestamp: required(
                    EVENT_PUSH,
                    &format!("commits[{i}].timestamp"),
                    commit.timestamp,
                )?,
            })
        })
        .collect()
}

fn normalize_pull_request(
    payload: &Value,
    received_at: Timestamp,
) -> Result<Normalized, PayloadError> {
    let envelope = decode::<PullRequestEnvelope>(EVENT_PULL_REQUEST, payload)?;
    let pr = required(EVENT_PULL_REQUEST, "pull_request", envelope.pull_request)?;
    let sub_action = required(EVENT_PULL_REQUEST, "action", envelope.action)?;

    let request_id = pull_request_id(pr.id)?;
    let author = required(
        EVENT_PULL_REQUEST,
        "pull_request.user.login",
        pr.user.and_then(|u| u.login),
    )?;
    let from_branch = required(
        EVENT_PULL_REQUEST,
        "pull_request.head.ref",
        pr.head.and_then(|h| h.git_ref),
    )?;
    let to_branch = required(
        EVENT_PULL_REQUEST,
        "pull_request.base.ref",
        pr.base.and_then(|b| b.git_ref),
    )?;

    let action = match sub_action.as_str() {
        PR_ACTION_OPENED => Some(EventAction::PullRequest),
        PR_ACTION_CLOSED if pr.merged.as_ref().is_some_and(is_truthy) => {
            Some(EventAction::Merge)
        }
        _ => None,
    };
    let Some(action) = action else {
        return Ok(Normalized::Ignored(
            IgnoreReason::UnsupportedPullRequestAction(sub_action),
        ));
    };

    Ok(Normalized::Events(vec![NewRepoEvent {
        request_id,
        author,
        action,
        from_branch: Some(from_branch),
        to_branch,
        timestamp: format_receipt_timestamp(received_at),
    }]))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Last `/`-separated segment of a git ref (`refs/heads/main` -> `main`).
pub fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}

fn decode<'a, T: Deserialize<'a>>(
    event_type: &'static str,
    payload: &'a Value,
) -> Result<T, PayloadError> {
    T::deserialize(payload).map_err(|e| PayloadError::InvalidField {
        event_type,
        message: e.to_string(),
    })
}

fn required<T>(
    event_type: &'static str,
    field: &str,
    value: Option<T>,
) -> Result<T, PayloadError> {
    value.ok_or_else(|| PayloadError::MissingField {
        event_type,
        field: field.to_string(),
    })
}

/// Loose truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Pull request ids are numeric on GitHub; string ids are passed through.
fn pull_request_id(id: Option<Value>) -> Result<String, PayloadError> {
    match id {
        None | Some(Value::Null) => Err(PayloadError::MissingField {
            event_type: EVENT_PULL_REQUEST,
            field: "pull_request.id".to_string(),
        }),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(PayloadError::InvalidField {
            event_type: EVENT_PULL_REQUEST,
            message: format!("pull_request.id must be a number or string, got {other}"),
        }),
    }
}
