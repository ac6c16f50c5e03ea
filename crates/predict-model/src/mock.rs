//! Test executors: deterministic results and forced failures, short delays.

use predict_types::{Executor, ExecutorError};
use std::time::Duration;

/// Executor that waits `delay` and returns `"echo:<input>"`.
#[derive(Debug, Clone)]
pub struct EchoModel {
    delay: Duration,
}

impl EchoModel {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for EchoModel {
    fn default() -> Self {
        Self::new(Duration::from_millis(20))
    }
}

#[async_trait::async_trait]
impl Executor for EchoModel {
    async fn predict(&self, input: &str) -> Result<String, ExecutorError> {
        tokio::time::sleep(self.delay).await;
        Ok(format!("echo:{}", input))
    }
}

/// Executor that always fails after `delay`.
#[derive(Debug, Clone)]
pub struct FailingModel {
    delay: Duration,
    message: String,
}

impl FailingModel {
    pub fn new(delay: Duration, message: impl Into<String>) -> Self {
        Self {
            delay,
            message: message.into(),
        }
    }
}

impl Default for FailingModel {
    fn default() -> Self {
        Self::new(Duration::from_millis(10), "model unavailable")
    }
}

#[async_trait::async_trait]
impl Executor for FailingModel {
    async fn predict(&self, _input: &str) -> Result<String, ExecutorError> {
        tokio::time::sleep(self.delay).await;
        Err(ExecutorError::Other(self.message.clone()))
    }
}

/// Executor that panics instead of returning.
#[derive(Debug, Clone, Default)]
pub struct PanickingModel;

#[async_trait::async_trait]
impl Executor for PanickingModel {
    async fn predict(&self, input: &str) -> Result<String, ExecutorError> {
        panic!("panicking model invoked with {:?}", input);
    }
}
