//! Axum server and routes.

use crate::error::{ApiError, INPUT_REQUIRED};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use predict_scheduler::JobRunner;
use predict_types::{AsyncAcceptedResponse, JobStatus, PredictRequest, PredictionResultResponse};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Header selecting async mode; only the exact value `true` enables it.
pub const ASYNC_MODE_HEADER: &str = "async-mode";

pub struct AppState {
    pub runner: Arc<dyn JobRunner>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(handle_predict))
        .route("/predict/:prediction_id", get(handle_get_prediction))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn is_async_mode(headers: &HeaderMap) -> bool {
    headers
        .get(ASYNC_MODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

async fn handle_predict(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let input = req
        .input
        .ok_or_else(|| ApiError::InvalidInput(INPUT_REQUIRED.to_string()))?;

    if is_async_mode(&headers) {
        let prediction_id = state.runner.submit_async(input).await?;
        tracing::info!(prediction_id = %prediction_id, "prediction submitted (async)");
        Ok((
            StatusCode::ACCEPTED,
            Json(AsyncAcceptedResponse::new(prediction_id)),
        )
            .into_response())
    } else {
        let output = state.runner.run_sync(&input).await?;
        Ok(Json(output).into_response())
    }
}

async fn handle_get_prediction(
    State(state): State<Arc<AppState>>,
    Path(prediction_id): Path<String>,
) -> Result<Json<PredictionResultResponse>, ApiError> {
    let job = state.runner.get(&prediction_id).await?;
    tracing::debug!(prediction_id = %prediction_id, status = %job.status, "prediction fetched");
    match job.status {
        JobStatus::Processing => Err(ApiError::StillProcessing(prediction_id)),
        JobStatus::Failed => Err(ApiError::Failed(
            job.error.unwrap_or_else(|| "unknown error".to_string()),
        )),
        JobStatus::Completed => {
            let output = job.output.ok_or_else(|| {
                ApiError::Internal(format!("completed job {} has no output", prediction_id))
            })?;
            Ok(Json(PredictionResultResponse {
                prediction_id,
                output,
            }))
        }
    }
}

async fn handle_health() -> &'static str {
    "ok"
}
