//! HTTP client for the inventory analytics API.
//!
//! Reqwest adapter implementing [`AnalyticsApi`] against the
//! `/analytics/*` endpoints. The base URL is injected through
//! [`ApiConfig`] rather than read from an ambient global. HTTP and
//! network errors map onto [`ApiError`] and are never retried here.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::{ApiConfig, InventoryMetric, TrendPoint};
use crate::domain::ports::AnalyticsApi;

/// HTTP client for the inventory analytics API.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct AnalyticsHttpClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL of the analytics server, without a trailing slash.
    base_url: String,
}

impl AnalyticsHttpClient {
    /// Create a client from endpoint configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> ApiResult<T> {
        tracing::debug!(%url, "analytics GET");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AnalyticsApi for AnalyticsHttpClient {
    async fn inventory_trend(&self) -> ApiResult<Vec<TrendPoint>> {
        self.get_json(format!("{}/analytics/inventory-trend", self.base_url))
            .await
    }

    async fn inventory_metrics(&self) -> ApiResult<Vec<InventoryMetric>> {
        self.get_json(format!("{}/analytics/metrics", self.base_url))
            .await
    }

    async fn product_trend(&self, product_id: &str) -> ApiResult<Vec<TrendPoint>> {
        self.get_json(format!(
            "{}/analytics/product-trend/{}",
            self.base_url, product_id
        ))
        .await
    }
}
