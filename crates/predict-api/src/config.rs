//! Server configuration, loaded from environment variables at startup.

use predict_scheduler::DEFAULT_MAX_CONCURRENT_JOBS;
use std::time::Duration;

/// Runtime configuration for predict-api. Every field has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8080"`).
    pub listen: String,

    /// Upper bound on background predictions running at once.
    pub max_concurrent_jobs: usize,

    /// Mock model latency window.
    pub model_min_delay: Duration,
    pub model_max_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
            model_min_delay: Duration::from_millis(10_000),
            model_max_delay: Duration::from_millis(17_000),
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen: std::env::var("PREDICT_LISTEN").unwrap_or(defaults.listen),
            max_concurrent_jobs: parse_env("PREDICT_MAX_CONCURRENT_JOBS", defaults.max_concurrent_jobs)
                .max(1),
            model_min_delay: Duration::from_millis(parse_env(
                "PREDICT_MODEL_MIN_DELAY_MS",
                defaults.model_min_delay.as_millis() as u64,
            )),
            model_max_delay: Duration::from_millis(parse_env(
                "PREDICT_MODEL_MAX_DELAY_MS",
                defaults.model_max_delay.as_millis() as u64,
            )),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparsable config value, using default");
            default
        }),
        Err(_) => default,
    }
}
