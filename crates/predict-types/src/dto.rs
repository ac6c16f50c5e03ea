//! Request and response DTOs for the `/predict` API.

use serde::{Deserialize, Serialize};

/// Acknowledgment returned with an async submission.
pub const ASYNC_ACCEPTED_MESSAGE: &str = "Request received. Processing asynchronously.";

/// Submit request body. `input` is optional at the serde level so the
/// handler can report a missing field with its own message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub input: Option<String>,
}

/// Result of one prediction: the input echoed back with the computed result.
/// Returned directly by sync submissions and stored on completed jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub input: String,
    pub result: String,
}

/// Body of a 202 response to an async submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsyncAcceptedResponse {
    pub message: String,
    pub prediction_id: String,
}

impl AsyncAcceptedResponse {
    pub fn new(prediction_id: String) -> Self {
        Self {
            message: ASYNC_ACCEPTED_MESSAGE.to_string(),
            prediction_id,
        }
    }
}

/// Body of a successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResultResponse {
    pub prediction_id: String,
    pub output: PredictionOutput,
}

/// Error body: `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
