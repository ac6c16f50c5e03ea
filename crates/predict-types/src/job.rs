//! Job record and lifecycle state for async predictions.

use crate::PredictionOutput;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// State of a job. `Processing` moves exactly once to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Processing)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked async prediction.
///
/// `output` is set iff `status == Completed`; `error` is set iff `status == Failed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PredictionOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Job {
    /// New job in `Processing` with no output.
    pub fn processing(job_id: impl Into<String>) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            job_id: job_id.into(),
            status: JobStatus::Processing,
            output: None,
            error: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Move to `Completed` and attach the output. Callers check `is_terminal` first.
    pub fn mark_completed(&mut self, output: PredictionOutput) {
        self.status = JobStatus::Completed;
        self.output = Some(output);
        self.updated_at = Utc::now().to_rfc3339();
    }

    /// Move to `Failed` with a message. Callers check `is_terminal` first.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.error = Some(message.into());
        self.updated_at = Utc::now().to_rfc3339();
    }
}
