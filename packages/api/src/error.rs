//! API error type and its mapping to HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use queue_core::QueueError;

use crate::types::ErrorResponse;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input from the client.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status code this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Queue(err) => match err {
                QueueError::EmptyQueue | QueueError::NoEligibleJob | QueueError::NotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                QueueError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                QueueError::InvalidState { .. } => StatusCode::CONFLICT,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status().is_server_error() {
            ApiError::Internal(rejection.body_text())
        } else {
            ApiError::Validation(rejection.body_text())
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        if rejection.status().is_server_error() {
            ApiError::Internal(rejection.body_text())
        } else {
            ApiError::Validation(format!("invalid job id: {}", rejection.body_text()))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use queue_core::{ConsumerId, JobId, JobStatus};

    use super::*;

    #[test]
    fn queue_errors_map_to_client_statuses() {
        let cases = [
            (QueueError::EmptyQueue, StatusCode::NOT_FOUND),
            (QueueError::NoEligibleJob, StatusCode::NOT_FOUND),
            (QueueError::NotFound(JobId(1)), StatusCode::NOT_FOUND),
            (
                QueueError::Unauthorized {
                    job_id: JobId(1),
                    consumer: ConsumerId::new("c"),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                QueueError::InvalidState {
                    job_id: JobId(1),
                    status: JobStatus::Concluded,
                },
                StatusCode::CONFLICT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn validation_and_internal_stay_distinct() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
