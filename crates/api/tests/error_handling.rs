//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use hooklog_api::error::AppError;
use hooklog_core::error::{PayloadError, StoreError};
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn invalid_json_returns_500_with_message() {
    let err = AppError::InvalidJson("expected value at line 1 column 1".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INVALID_JSON");
    assert_eq!(
        json["error"],
        "Invalid JSON body: expected value at line 1 column 1"
    );
}

#[tokio::test]
async fn invalid_body_returns_500_with_body_code() {
    let err = AppError::InvalidBody("length limit exceeded".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INVALID_BODY");
    assert_eq!(json["error"], "Unreadable request body: length limit exceeded");
}

#[tokio::test]
async fn missing_field_returns_500_naming_the_field() {
    let err = AppError::from(PayloadError::MissingField {
        event_type: "pull_request",
        field: "pull_request.user.login".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "MALFORMED_PAYLOAD");
    assert_eq!(
        json["error"],
        "Malformed pull_request payload: missing required field 'pull_request.user.login'"
    );
}

#[tokio::test]
async fn store_error_returns_500_with_store_code() {
    let err = AppError::from(StoreError::backend(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "connection timed out",
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORE_ERROR");
    assert_eq!(json["error"], "Event store error: connection timed out");
}
