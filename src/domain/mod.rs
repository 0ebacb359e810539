//! Domain layer for the stocklens analytics client
//!
//! This module contains the wire records, error taxonomy, and port
//! traits. Nothing in here touches the network or the terminal.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ApiError, ApiResult};
