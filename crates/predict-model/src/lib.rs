//! Prediction executors.

#[cfg(feature = "test-util")]
pub mod mock;
mod model;

pub use model::MockModel;
pub use predict_types::{Executor, ExecutorError};

#[cfg(feature = "test-util")]
pub use mock::{EchoModel, FailingModel, PanickingModel};
