//! Service layer: the query cache and the analytics fetchers.

pub mod analytics;
pub mod query_cache;

pub use analytics::{AnalyticsService, QueryOptions};
pub use query_cache::{QueryCache, QueryHandle, QueryKey, QueryState, QueryStatus};
