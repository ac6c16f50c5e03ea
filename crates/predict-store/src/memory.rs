//! In-memory job store (process lifetime only).

use predict_types::{Job, JobStore, JobStoreError, PredictionOutput};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory JobStore: job_id -> Job behind one RwLock.
///
/// Transitions take the write lock for the whole check-and-set, so a reader
/// never observes a status without its output.
#[derive(Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn transition<F>(&self, job_id: &str, apply: F) -> Result<(), JobStoreError>
    where
        F: FnOnce(&mut Job) + Send,
    {
        let mut guard = self.jobs.write().await;
        let job = guard
            .get_mut(job_id)
            .ok_or_else(|| JobStoreError::NotFound(job_id.to_string()))?;
        if job.status.is_terminal() {
            return Err(JobStoreError::AlreadyFinished(job_id.to_string()));
        }
        apply(job);
        Ok(())
    }
}

#[async_trait::async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, job: Job) -> Result<(), JobStoreError> {
        let mut guard = self.jobs.write().await;
        match guard.entry(job.job_id.clone()) {
            Entry::Occupied(e) => Err(JobStoreError::AlreadyExists(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(job);
                Ok(())
            }
        }
    }

    async fn complete(&self, job_id: &str, output: PredictionOutput) -> Result<(), JobStoreError> {
        self.transition(job_id, |job| job.mark_completed(output)).await
    }

    async fn fail(&self, job_id: &str, message: &str) -> Result<(), JobStoreError> {
        self.transition(job_id, |job| job.mark_failed(message)).await
    }

    async fn get(&self, job_id: &str) -> Result<Job, JobStoreError> {
        let guard = self.jobs.read().await;
        guard
            .get(job_id)
            .cloned()
            .ok_or_else(|| JobStoreError::NotFound(job_id.to_string()))
    }

    async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }
}
