//! Job runner: sync predictions inline, async predictions through a bounded worker pool.

mod memory;
mod trait_;

pub use memory::{InMemoryJobRunner, DEFAULT_MAX_CONCURRENT_JOBS};
pub use trait_::{JobRunner, RunnerError};
