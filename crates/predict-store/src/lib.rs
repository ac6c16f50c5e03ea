//! Job store: concurrency-safe registry of async prediction jobs.

mod memory;

pub use memory::InMemoryJobStore;
pub use predict_types::{Job, JobStatus, JobStore, JobStoreError};
