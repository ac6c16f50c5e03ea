//! Runner trait: run inline, submit async job, get job.

use async_trait::async_trait;
use predict_types::{ExecutorError, Job, JobStoreError, PredictionOutput};

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Store(#[from] JobStoreError),
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    #[error("runner error: {0}")]
    Other(String),
}

/// Runs predictions either inline or as tracked background jobs.
///
/// Contract: when `submit_async` returns an id, `get` on that id already
/// succeeds (status `Processing` or later). The API layer maps
/// `RunnerError::Store(JobStoreError::NotFound)` to HTTP 404.
#[async_trait]
pub trait JobRunner: Send + Sync {
    /// Run the executor inline and return its output. No job is created.
    async fn run_sync(&self, input: &str) -> Result<PredictionOutput, RunnerError>;

    /// Register a processing job, queue it for a worker, and return its id.
    async fn submit_async(&self, input: String) -> Result<String, RunnerError>;

    /// Current state of a job.
    async fn get(&self, job_id: &str) -> Result<Job, RunnerError>;
}
