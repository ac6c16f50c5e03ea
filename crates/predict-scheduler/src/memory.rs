//! In-memory runner: unbounded submit queue, dispatcher, and a semaphore
//! bounding how many executors run at once.

use crate::{JobRunner, RunnerError};
use async_trait::async_trait;
use predict_types::{Executor, ExecutorError, Job, JobStore, PredictionOutput};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use uuid::Uuid;

pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 16;

/// In-memory runner: async submissions are queued, a dispatcher hands each
/// one to its own task once a worker permit is free, and the task writes the
/// terminal state back to the store.
pub struct InMemoryJobRunner {
    executor: Arc<dyn Executor>,
    store: Arc<dyn JobStore>,
    tx: mpsc::UnboundedSender<(String, String)>,
}

impl InMemoryJobRunner {
    /// Create the runner and spawn its dispatcher. Must be called inside a tokio runtime.
    /// At most `max_concurrent_jobs` (minimum 1) background executions run at once;
    /// further submissions wait in the queue.
    pub fn new(
        executor: Arc<dyn Executor>,
        store: Arc<dyn JobStore>,
        max_concurrent_jobs: usize,
    ) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<(String, String)>();
        let permits = Arc::new(Semaphore::new(max_concurrent_jobs.max(1)));

        let executor_clone = Arc::clone(&executor);
        let store_clone = Arc::clone(&store);
        tokio::spawn(async move {
            while let Some((job_id, input)) = rx.recv().await {
                let permit = match Arc::clone(&permits).acquire_owned().await {
                    Ok(p) => p,
                    Err(_) => break,
                };
                let executor = Arc::clone(&executor_clone);
                let store = Arc::clone(&store_clone);
                tokio::spawn(async move {
                    run_job(executor, store, job_id, input).await;
                    drop(permit);
                });
            }
            tracing::debug!("job dispatcher stopped");
        });

        Self {
            executor,
            store,
            tx,
        }
    }
}

/// Run the executor on its own task so a panic surfaces as an error
/// instead of unwinding through the caller.
async fn predict_isolated(
    executor: Arc<dyn Executor>,
    input: String,
) -> Result<String, ExecutorError> {
    match tokio::spawn(async move { executor.predict(&input).await }).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "executor task aborted");
            if e.is_panic() {
                Err(ExecutorError::Panicked)
            } else {
                Err(ExecutorError::Cancelled)
            }
        }
    }
}

/// Run one job to a terminal state. Executor errors and panics become `Failed`.
async fn run_job(
    executor: Arc<dyn Executor>,
    store: Arc<dyn JobStore>,
    job_id: String,
    input: String,
) {
    let recorded = match predict_isolated(executor, input.clone()).await {
        Ok(result) => {
            tracing::info!(prediction_id = %job_id, "prediction completed");
            store.complete(&job_id, PredictionOutput { input, result }).await
        }
        Err(e) => {
            tracing::warn!(prediction_id = %job_id, error = %e, "prediction failed");
            store.fail(&job_id, &e.to_string()).await
        }
    };
    if let Err(e) = recorded {
        tracing::error!(prediction_id = %job_id, error = %e, "failed to record job outcome");
    }
}

#[async_trait]
impl JobRunner for InMemoryJobRunner {
    async fn run_sync(&self, input: &str) -> Result<PredictionOutput, RunnerError> {
        let result = predict_isolated(Arc::clone(&self.executor), input.to_string()).await?;
        Ok(PredictionOutput {
            input: input.to_string(),
            result,
        })
    }

    async fn submit_async(&self, input: String) -> Result<String, RunnerError> {
        let job_id = Uuid::new_v4().to_string();
        self.store.create(Job::processing(job_id.clone())).await?;
        if self.tx.send((job_id.clone(), input)).is_err() {
            let message = "worker channel closed";
            // Do not leave the job stuck at processing.
            if let Err(e) = self.store.fail(&job_id, message).await {
                tracing::error!(prediction_id = %job_id, error = %e, "failed to record job outcome");
            }
            return Err(RunnerError::Other(message.to_string()));
        }
        tracing::debug!(prediction_id = %job_id, "prediction queued");
        Ok(job_id)
    }

    async fn get(&self, job_id: &str) -> Result<Job, RunnerError> {
        Ok(self.store.get(job_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predict_model::{EchoModel, FailingModel, PanickingModel};
    use predict_store::InMemoryJobStore;
    use predict_types::{ExecutorError, JobStatus, JobStoreError};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn runner_with(
        executor: Arc<dyn Executor>,
        max: usize,
    ) -> (InMemoryJobRunner, Arc<InMemoryJobStore>) {
        let store = Arc::new(InMemoryJobStore::new());
        let runner = InMemoryJobRunner::new(executor, store.clone(), max);
        (runner, store)
    }

    async fn wait_terminal(runner: &InMemoryJobRunner, job_id: &str) -> Job {
        for _ in 0..200 {
            let job = runner.get(job_id).await.unwrap();
            if job.status.is_terminal() {
                return job;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job {} never finished", job_id);
    }

    #[tokio::test]
    async fn run_sync_returns_output_without_creating_job() {
        let (runner, store) = runner_with(Arc::new(EchoModel::default()), 4);
        let out = runner.run_sync("hello").await.unwrap();
        assert_eq!(out.input, "hello");
        assert_eq!(out.result, "echo:hello");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn run_sync_propagates_executor_error() {
        let (runner, store) = runner_with(Arc::new(FailingModel::default()), 4);
        let err = runner.run_sync("hello").await.unwrap_err();
        assert!(matches!(err, RunnerError::Executor(ExecutorError::Other(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn run_sync_reports_executor_panic_as_error() {
        let (runner, store) = runner_with(Arc::new(PanickingModel), 4);
        let err = runner.run_sync("hello").await.unwrap_err();
        assert!(matches!(err, RunnerError::Executor(ExecutorError::Panicked)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn submitted_id_is_immediately_processing() {
        let (runner, _store) = runner_with(Arc::new(EchoModel::new(Duration::from_millis(200))), 4);
        let id = runner.submit_async("x".to_string()).await.unwrap();
        let job = runner.get(&id).await.unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.output.is_none());
    }

    #[tokio::test]
    async fn async_job_completes_with_own_input() {
        let (runner, _store) = runner_with(Arc::new(EchoModel::default()), 4);
        let id = runner.submit_async("payload".to_string()).await.unwrap();
        let job = wait_terminal(&runner, &id).await;
        assert_eq!(job.status, JobStatus::Completed);
        let out = job.output.unwrap();
        assert_eq!(out.input, "payload");
        assert_eq!(out.result, "echo:payload");
    }

    #[tokio::test]
    async fn executor_error_becomes_failed_job() {
        let (runner, _store) = runner_with(Arc::new(FailingModel::default()), 4);
        let id = runner.submit_async("x".to_string()).await.unwrap();
        let job = wait_terminal(&runner, &id).await;
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("model unavailable"));
        assert!(job.output.is_none());
    }

    #[tokio::test]
    async fn executor_panic_becomes_failed_job() {
        let (runner, _store) = runner_with(Arc::new(PanickingModel), 4);
        let id = runner.submit_async("x".to_string()).await.unwrap();
        let job = wait_terminal(&runner, &id).await;
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("executor panicked"));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (runner, _store) = runner_with(Arc::new(EchoModel::default()), 4);
        let err = runner.get("does-not-exist").await.unwrap_err();
        assert!(matches!(err, RunnerError::Store(JobStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn many_submissions_get_distinct_ids_and_own_outputs() {
        let (runner, store) = runner_with(Arc::new(EchoModel::default()), 8);
        let runner = Arc::new(runner);
        let mut handles = Vec::new();
        for i in 0..50 {
            let runner = Arc::clone(&runner);
            handles.push(tokio::spawn(async move {
                let input = format!("input-{}", i);
                let id = runner.submit_async(input.clone()).await.unwrap();
                (id, input)
            }));
        }
        let mut submitted = Vec::new();
        for h in handles {
            submitted.push(h.await.unwrap());
        }
        let ids: HashSet<&String> = submitted.iter().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(store.len().await, 50);

        for (id, input) in &submitted {
            let job = wait_terminal(&runner, id).await;
            assert_eq!(job.output.unwrap().input, *input);
        }
    }

    struct CountingModel {
        running: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Executor for CountingModel {
        async fn predict(&self, input: &str) -> Result<String, ExecutorError> {
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.running.fetch_sub(1, Ordering::SeqCst);
            Ok(input.to_string())
        }
    }

    #[tokio::test]
    async fn concurrency_is_bounded_but_all_jobs_finish() {
        let model = Arc::new(CountingModel {
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let (runner, _store) = runner_with(model.clone(), 2);
        let mut ids = Vec::new();
        for i in 0..8 {
            ids.push(runner.submit_async(i.to_string()).await.unwrap());
        }
        for id in &ids {
            assert_eq!(wait_terminal(&runner, id).await.status, JobStatus::Completed);
        }
        assert!(model.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn single_permit_runs_jobs_one_at_a_time() {
        let model = Arc::new(CountingModel {
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let (runner, _store) = runner_with(model.clone(), 1);
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(runner.submit_async(i.to_string()).await.unwrap());
        }
        for (i, id) in ids.iter().enumerate() {
            let job = wait_terminal(&runner, id).await;
            assert_eq!(job.status, JobStatus::Completed);
            assert_eq!(job.output.unwrap().input, i.to_string());
        }
        assert_eq!(model.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_permits_is_clamped_to_one() {
        let model = Arc::new(CountingModel {
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let (runner, _store) = runner_with(model.clone(), 0);
        let mut ids = Vec::new();
        for i in 0..3 {
            ids.push(runner.submit_async(i.to_string()).await.unwrap());
        }
        for id in &ids {
            assert_eq!(wait_terminal(&runner, id).await.status, JobStatus::Completed);
        }
        assert_eq!(model.peak.load(Ordering::SeqCst), 1);
    }
}
