//! HTTP surface for the prediction job service.

pub mod config;
pub mod error;
pub mod server;
