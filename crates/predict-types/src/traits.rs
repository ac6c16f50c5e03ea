//! Traits for the executor and job store backends.

use crate::{Job, PredictionOutput};
use async_trait::async_trait;

/// Unit of work run per prediction: input string in, result string out,
/// after a bounded but variable delay.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn predict(&self, input: &str) -> Result<String, ExecutorError>;
}

/// Registry of async job state.
///
/// Implementations must make every operation atomic with respect to the
/// others: a reader sees a job either fully before or fully after a
/// transition, never a status without its output.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new job under `job.job_id`. Fails if the id already exists.
    async fn create(&self, job: Job) -> Result<(), JobStoreError>;

    /// Transition a processing job to `Completed` with its output.
    async fn complete(&self, job_id: &str, output: PredictionOutput) -> Result<(), JobStoreError>;

    /// Transition a processing job to `Failed` with an error message.
    async fn fail(&self, job_id: &str, message: &str) -> Result<(), JobStoreError>;

    /// Snapshot of the job's current state.
    async fn get(&self, job_id: &str) -> Result<Job, JobStoreError>;

    /// Number of jobs tracked.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("executor error: {0}")]
    Other(String),
    #[error("executor panicked")]
    Panicked,
    #[error("executor task cancelled")]
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum JobStoreError {
    #[error("job not found: {0}")]
    NotFound(String),
    #[error("job already exists: {0}")]
    AlreadyExists(String),
    #[error("job already finished: {0}")]
    AlreadyFinished(String),
}
