//! Core types and traits for the prediction job service.
//!
//! Request/response DTOs keep the JSON shape of the original `/predict` API.

mod dto;
mod job;
mod traits;

pub use dto::*;
pub use job::*;
pub use traits::*;
