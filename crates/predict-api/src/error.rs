//! API error type.
//!
//! Handlers return `Result<T, ApiError>`; `ApiError` renders as a JSON body
//! `{"detail": "..."}` with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use predict_scheduler::RunnerError;
use predict_types::{ErrorResponse, JobStoreError};

pub const INPUT_REQUIRED: &str = "Input is required";
pub const PREDICTION_NOT_FOUND: &str = "Prediction ID not found.";
pub const STILL_PROCESSING: &str = "Prediction is still being processed.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed submission body.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unknown prediction id.
    #[error("prediction not found: {0}")]
    NotFound(String),

    /// Known prediction id whose job has not finished.
    #[error("prediction still processing: {0}")]
    StillProcessing(String),

    /// The executor failed, inline or in the background.
    #[error("prediction failed: {0}")]
    Failed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::InvalidInput(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, PREDICTION_NOT_FOUND.to_string()),
            ApiError::StillProcessing(_) => (StatusCode::BAD_REQUEST, STILL_PROCESSING.to_string()),
            ApiError::Failed(m) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Prediction failed: {}", m),
            ),
            ApiError::Internal(m) => {
                tracing::error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<RunnerError> for ApiError {
    fn from(e: RunnerError) -> Self {
        match e {
            RunnerError::Store(JobStoreError::NotFound(id)) => ApiError::NotFound(id),
            RunnerError::Executor(e) => ApiError::Failed(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
