//! Analytics fetchers over the query cache.
//!
//! The three operations mirror the read surface of the analytics
//! server. Each returns a [`QueryHandle`] immediately; when a request is
//! needed it runs on a detached task through the [`AnalyticsApi`] port.

use std::sync::Arc;
use std::time::Duration;

use super::query_cache::{QueryCache, QueryHandle, QueryKey};
use crate::domain::models::{CacheConfig, InventoryMetric, TrendPoint};
use crate::domain::ports::AnalyticsApi;

/// Cache key scope for the aggregate inventory trend.
const INVENTORY_TREND_KEY: &str = "inventory-trend";

/// Cache key scope for inventory metrics.
const INVENTORY_METRICS_KEY: &str = "inventory-metrics";

/// Cache key scope for per-product trends.
const PRODUCT_TREND_SCOPE: &str = "product-trend";

/// Per-call options for parameterized fetchers.
///
/// Caller-supplied values override the computed defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    /// Overrides the computed `enabled` precondition when set.
    pub enabled: Option<bool>,
}

impl QueryOptions {
    /// Options with `enabled` pinned to the given value.
    pub const fn enabled(value: bool) -> Self {
        Self {
            enabled: Some(value),
        }
    }
}

/// The three analytics fetchers.
///
/// Shares one [`AnalyticsApi`] port across per-resource query caches, so
/// repeated and concurrent invocations with the same key reuse in-flight
/// or recently-fetched results.
pub struct AnalyticsService {
    api: Arc<dyn AnalyticsApi>,
    trend: QueryCache<Vec<TrendPoint>>,
    metrics: QueryCache<Vec<InventoryMetric>>,
    product_trends: QueryCache<Vec<TrendPoint>>,
}

impl AnalyticsService {
    /// Create the service over an API port.
    pub fn new(api: Arc<dyn AnalyticsApi>, cache: &CacheConfig) -> Self {
        let stale_after = Duration::from_secs(cache.stale_after_secs);
        Self {
            api,
            trend: QueryCache::new(stale_after),
            metrics: QueryCache::new(stale_after),
            product_trends: QueryCache::new(stale_after),
        }
    }

    /// Aggregate stock trend, chronological as delivered by the server.
    pub async fn inventory_trend(&self) -> QueryHandle<Vec<TrendPoint>> {
        let api = Arc::clone(&self.api);
        self.trend
            .get_or_fetch(QueryKey::fixed(INVENTORY_TREND_KEY), move || async move {
                api.inventory_trend().await
            })
            .await
    }

    /// Per-item inventory health metrics, in server order.
    pub async fn inventory_metrics(&self) -> QueryHandle<Vec<InventoryMetric>> {
        let api = Arc::clone(&self.api);
        self.metrics
            .get_or_fetch(QueryKey::fixed(INVENTORY_METRICS_KEY), move || async move {
                api.inventory_metrics().await
            })
            .await
    }

    /// Stock trend for one product.
    ///
    /// The fetch is only issued when the identifier is non-empty and the
    /// caller has not disabled it through `options`; otherwise no request
    /// is made and the returned handle is Idle and stays Idle. An empty
    /// identifier is a no-op precondition, not an error.
    pub async fn product_trend(
        &self,
        product_id: &str,
        options: QueryOptions,
    ) -> QueryHandle<Vec<TrendPoint>> {
        let enabled = options.enabled.unwrap_or(!product_id.is_empty());
        if !enabled || product_id.is_empty() {
            tracing::debug!(product_id, "product trend query disabled, staying idle");
            return QueryHandle::idle();
        }

        let api = Arc::clone(&self.api);
        let id = product_id.to_string();
        self.product_trends
            .get_or_fetch(
                QueryKey::scoped(PRODUCT_TREND_SCOPE, product_id),
                move || async move { api.product_trend(&id).await },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::errors::{ApiError, ApiResult};

    /// Counting port double; optionally fails every metrics call.
    #[derive(Default)]
    struct MockApi {
        trend_calls: AtomicUsize,
        metrics_calls: AtomicUsize,
        product_calls: AtomicUsize,
        fail_metrics: bool,
    }

    fn points() -> Vec<TrendPoint> {
        vec![
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                stock: 120,
            },
            TrendPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                stock: 95,
            },
        ]
    }

    #[async_trait]
    impl AnalyticsApi for MockApi {
        async fn inventory_trend(&self) -> ApiResult<Vec<TrendPoint>> {
            self.trend_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(points())
        }

        async fn inventory_metrics(&self) -> ApiResult<Vec<InventoryMetric>> {
            self.metrics_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_metrics {
                return Err(ApiError::Status {
                    status: 500,
                    body: "internal error".to_string(),
                });
            }
            Ok(vec![])
        }

        async fn product_trend(&self, _product_id: &str) -> ApiResult<Vec<TrendPoint>> {
            self.product_calls.fetch_add(1, Ordering::SeqCst);
            Ok(points())
        }
    }

    fn service(api: &Arc<MockApi>) -> AnalyticsService {
        AnalyticsService::new(
            Arc::clone(api) as Arc<dyn AnalyticsApi>,
            &CacheConfig {
                stale_after_secs: 60,
            },
        )
    }

    #[tokio::test]
    async fn concurrent_trend_fetches_issue_one_request() {
        let api = Arc::new(MockApi::default());
        let service = service(&api);

        let mut first = service.inventory_trend().await;
        let mut second = service.inventory_trend().await;
        first.settled().await;
        let state = second.settled().await;

        assert_eq!(api.trend_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.data, Some(points()));
    }

    #[tokio::test]
    async fn metrics_failure_surfaces_as_error_state() {
        let api = Arc::new(MockApi {
            fail_metrics: true,
            ..MockApi::default()
        });
        let service = service(&api);

        let mut handle = service.inventory_metrics().await;
        let state = handle.settled().await;

        assert!(state.is_error());
        assert_eq!(state.data, None);
        assert_eq!(state.error.unwrap().status_code(), Some(500));
    }

    #[tokio::test]
    async fn empty_product_id_issues_no_request() {
        let api = Arc::new(MockApi::default());
        let service = service(&api);

        let handle = service.product_trend("", QueryOptions::default()).await;

        assert!(handle.is_idle());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(handle.is_idle());
        assert_eq!(api.product_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disabled_option_wins_over_valid_id() {
        let api = Arc::new(MockApi::default());
        let service = service(&api);

        let handle = service
            .product_trend("sku-42", QueryOptions::enabled(false))
            .await;

        assert!(handle.is_idle());
        assert_eq!(api.product_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enabled_override_cannot_bypass_empty_id() {
        let api = Arc::new(MockApi::default());
        let service = service(&api);

        let handle = service.product_trend("", QueryOptions::enabled(true)).await;

        assert!(handle.is_idle());
        assert_eq!(api.product_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn distinct_products_fetch_independently() {
        let api = Arc::new(MockApi::default());
        let service = service(&api);

        let mut a = service.product_trend("sku-1", QueryOptions::default()).await;
        let mut b = service.product_trend("sku-2", QueryOptions::default()).await;
        a.settled().await;
        b.settled().await;

        assert_eq!(api.product_calls.load(Ordering::SeqCst), 2);

        // Same id again within the stale window: no third request.
        let mut again = service.product_trend("sku-1", QueryOptions::default()).await;
        let state = again.settled().await;
        assert_eq!(api.product_calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.data, Some(points()));
    }
}
