//! Application error type mapping to HTTP status codes and the service's
//! `{"status":"error","message":…}` body shape.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use vodsearch_types::error::{SearchError, SnapshotError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The engine has not finished loading.
    NotReady,
    /// Core ingest/query failures.
    Search(SearchError),
    /// Snapshot persistence failures.
    Snapshot(SnapshotError),
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        ApiError::Search(e)
    }
}

impl From<SnapshotError> for ApiError {
    fn from(e: SnapshotError) -> Self {
        ApiError::Snapshot(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service is still loading".to_string(),
            ),
            // Validation failures describe the caller's own input and are
            // safe to echo back.
            ApiError::Search(
                e @ (SearchError::EmptyBatch
                | SearchError::EmptyQuery
                | SearchError::UnknownProperty(_)),
            ) => (StatusCode::BAD_REQUEST, e.to_string()),
            // Internal detail goes to the log, not to the caller.
            ApiError::Search(e) => {
                tracing::error!(error = %e, "search operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
            ApiError::Snapshot(e) => {
                tracing::error!(error = %e, "snapshot operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to persist data".to_string(),
                )
            }
        };

        let body = json!({ "status": "error", "message": message });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_400() {
        for err in [
            ApiError::Search(SearchError::EmptyBatch),
            ApiError::Search(SearchError::EmptyQuery),
            ApiError::Search(SearchError::UnknownProperty("studio".to_string())),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        let response =
            ApiError::Search(SearchError::Provider("onnx exploded".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response =
            ApiError::Snapshot(SnapshotError::Io("disk full".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_ready_maps_to_503() {
        let response = ApiError::NotReady.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
