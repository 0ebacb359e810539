//! Infrastructure layer: external integrations and adapters
//!
//! - `http`: reqwest adapter for the analytics endpoints
//! - `config`: hierarchical configuration loading (figment)
//! - `logging`: tracing subscriber initialization

pub mod config;
pub mod http;
pub mod logging;
