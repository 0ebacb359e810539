//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interface that infrastructure
//! adapters must implement:
//! - `AnalyticsApi`: read-only analytics endpoint operations
//!
//! The service layer depends on this trait rather than a concrete HTTP
//! client, so tests can substitute a counting or failing mock.

pub mod analytics_api;

pub use analytics_api::AnalyticsApi;
