//! Error types and their HTTP mappings
//!
//! [`StoreError`] covers everything the storage layer can report;
//! [`ApiError`] is the HTTP-facing taxonomy. Storage failures cross the
//! boundary as opaque 500s, while missing input and unknown codes get
//! specific, user-facing shapes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors reported by the mapping store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database I/O or transaction failure.
    #[error("storage failure: {0}")]
    Backend(#[from] redb::Error),

    /// A stored record could not be deserialized.
    #[error("corrupted mapping record: {0}")]
    Codec(#[from] serde_json::Error),

    /// Every generated candidate collided with an existing code. The code
    /// space is saturated; increase the code length.
    #[error("short code space exhausted after {attempts} attempts")]
    CapacityExhausted { attempts: u32 },
}

// redb reports distinct error types per operation; fold them all into the
// umbrella redb::Error so `?` works at every call site.
impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        Self::Backend(err.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        Self::Backend(err.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        Self::Backend(err.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        Self::Backend(err.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        Self::Backend(err.into())
    }
}

/// Errors surfaced through the HTTP API.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or unusable input. Maps to 400 with a JSON error message.
    Validation(String),

    /// Unknown short code. An ordinary outcome, not a failure; maps to a
    /// plain-text 404.
    NotFound,

    /// Any unexpected internal failure. Maps to 500 with the underlying
    /// message.
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "URL not found").into_response(),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_exhausted_message_names_attempts() {
        let err = StoreError::CapacityExhausted { attempts: 10 };
        assert_eq!(
            err.to_string(),
            "short code space exhausted after 10 attempts"
        );
    }

    #[test]
    fn store_errors_map_to_internal() {
        let api: ApiError = StoreError::CapacityExhausted { attempts: 10 }.into();
        assert!(matches!(api, ApiError::Internal(_)));
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let response = ApiError::Validation("No URL provided".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
