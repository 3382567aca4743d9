use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hooklog_core::error::{PayloadError, StoreError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Every variant is a failed delivery from the sender's point of view and
/// maps to `500` with a JSON body carrying the error description, so the
/// sender can inspect and redeliver it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body could not be read, e.g. it exceeds the size limit.
    #[error("Unreadable request body: {0}")]
    InvalidBody(String),

    /// The request body is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// A recognized webhook is missing required data.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The event store failed to read or write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Machine-readable code included next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidBody(_) => "INVALID_BODY",
            AppError::InvalidJson(_) => "INVALID_JSON",
            AppError::Payload(_) => "MALFORMED_PAYLOAD",
            AppError::Store(_) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.to_string(),
            "code": self.code(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
