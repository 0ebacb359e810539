//! Domain models: analytics wire records and configuration.

pub mod analytics;
pub mod config;

pub use analytics::{InventoryMetric, TrendPoint};
pub use config::{ApiConfig, CacheConfig, Config, LoggingConfig};
