use async_trait::async_trait;

use crate::domain::errors::ApiResult;
use crate::domain::models::{InventoryMetric, TrendPoint};

/// Read-only operations against the analytics server.
///
/// All three operations are single GET requests with no request body.
/// Implementations surface failures through [`ApiResult`] without
/// retrying; sequences come back in server-delivered order.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Fetch the aggregate stock trend, chronological as delivered.
    async fn inventory_trend(&self) -> ApiResult<Vec<TrendPoint>>;

    /// Fetch per-item inventory health metrics. Ordering is whatever
    /// the server returns.
    async fn inventory_metrics(&self) -> ApiResult<Vec<InventoryMetric>>;

    /// Fetch the stock trend for a single product.
    ///
    /// The identifier is embedded in the request path; callers are
    /// expected to have checked it is non-empty.
    async fn product_trend(&self, product_id: &str) -> ApiResult<Vec<TrendPoint>>;
}
