//! HTTP adapter for the analytics API.

pub mod client;

pub use client::AnalyticsHttpClient;
