//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Every body carries `status: "error"`, a machine-readable `error` kind and
//! a human-readable `message`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use likectl_core::{BatchProgress, LikeError, StoreError, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Malformed path or query value (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Storage failure, rolled back (500, logged)
    Storage(StoreError),

    /// Batch stopped mid-way; committed chunks are reported (500, logged)
    PartialBatch {
        progress: BatchProgress,
        source: StoreError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "status": "error",
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "status": "error",
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "status": "error",
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Storage(e) => {
                // Log the actual error, return generic message
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "status": "error",
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
            Self::PartialBatch { progress, source } => {
                tracing::error!(
                    chunks_committed = progress.chunks_committed,
                    processed = progress.processed,
                    added = progress.added,
                    "Batch stopped: {}",
                    source
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "status": "error",
                        "error": "partial_batch",
                        "message": format!(
                            "stopped after {} committed chunk(s); re-run to resume",
                            progress.chunks_committed
                        ),
                        "processed_chunks": progress.chunks_committed,
                        "processed": progress.processed,
                        "added": progress.added
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<LikeError> for ApiError {
    fn from(e: LikeError) -> Self {
        match e {
            LikeError::CollectionNotFound { name } => Self::NotFound {
                resource: "collection",
                id: name,
            },
            LikeError::Store(source) => Self::Storage(source),
            LikeError::PartialBatch { progress, source } => Self::PartialBatch { progress, source },
            LikeError::Validation(v) => Self::Validation(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty {
            field: "collection name",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_collection_is_404() {
        let err = ApiError::from(LikeError::CollectionNotFound {
            name: "Liked Companies".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "collection 'Liked Companies' not found");
    }

    #[tokio::test]
    async fn storage_error_hides_details() {
        let err = ApiError::from(LikeError::Store(StoreError::Unavailable(
            "password authentication failed".into(),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "an internal error occurred");
    }

    #[tokio::test]
    async fn partial_batch_reports_progress() {
        let err = ApiError::from(LikeError::PartialBatch {
            progress: BatchProgress {
                chunks_committed: 2,
                processed: 2000,
                added: 1800,
            },
            source: StoreError::Unavailable("gone".into()),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "partial_batch");
        assert_eq!(body["processed_chunks"], 2);
        assert_eq!(body["processed"], 2000);
        assert_eq!(body["added"], 1800);
    }
}
