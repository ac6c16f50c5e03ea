//! Mock model: sleeps for a random delay, then returns a random integer.

use predict_types::{Executor, ExecutorError};
use rand::Rng;
use std::time::Duration;

const RESULT_MIN: u32 = 1000;
const RESULT_MAX: u32 = 20000;

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Stand-in for a real model. Each call sleeps for a uniformly random delay
/// in `[min_delay, max_delay]` and returns a random integer in `[1000, 20000]`.
#[derive(Debug, Clone)]
pub struct MockModel {
    min_delay: Duration,
    max_delay: Duration,
}

impl MockModel {
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        if min_delay <= max_delay {
            Self { min_delay, max_delay }
        } else {
            Self {
                min_delay: max_delay,
                max_delay: min_delay,
            }
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_secs(17))
    }
}

#[async_trait::async_trait]
impl Executor for MockModel {
    async fn predict(&self, input: &str) -> Result<String, ExecutorError> {
        // ThreadRng is !Send; draw everything before the await.
        let (delay, result) = {
            let mut rng = rand::thread_rng();
            let delay_ms = rng.gen_range(millis(self.min_delay)..=millis(self.max_delay));
            (
                Duration::from_millis(delay_ms),
                rng.gen_range(RESULT_MIN..=RESULT_MAX),
            )
        };
        tracing::debug!(delay_ms = millis(delay), input_len = input.len(), "mock predict");
        tokio::time::sleep(delay).await;
        Ok(result.to_string())
    }
}
