//! Stocklens - typed client for inventory analytics APIs
//!
//! Stocklens fetches analytics data (aggregate inventory trend, per-item
//! inventory metrics, per-product trend) from an HTTP server and exposes
//! it through a reactive query cache: keyed entries, in-flight request
//! deduplication, and handles carrying loading/success/error state with
//! subscribe-to-changes.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): wire records, error taxonomy, port traits
//! - **Infrastructure Layer** (`infrastructure`): reqwest adapter,
//!   configuration loading, logging setup
//! - **Service Layer** (`services`): query cache and the three fetchers
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stocklens::{AnalyticsHttpClient, AnalyticsService, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = AnalyticsHttpClient::new(&config.api)?;
//!     let service = AnalyticsService::new(Arc::new(client), &config.cache);
//!
//!     let mut handle = service.inventory_trend().await;
//!     let state = handle.settled().await;
//!     println!("{:?}", state.data);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ApiError, ApiResult};
pub use domain::models::{
    ApiConfig, CacheConfig, Config, InventoryMetric, LoggingConfig, TrendPoint,
};
pub use domain::ports::AnalyticsApi;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::http::AnalyticsHttpClient;
pub use services::{
    AnalyticsService, QueryHandle, QueryKey, QueryOptions, QueryState, QueryStatus,
};
