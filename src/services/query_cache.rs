//! Reactive query cache.
//!
//! Re-expresses get-or-fetch-with-key semantics as an explicit
//! future-with-state abstraction: each key owns a watch channel carrying
//! a [`QueryState`], and a [`QueryHandle`] is a cheap receiver clone with
//! snapshot accessors plus subscribe-to-changes. For a given key at most
//! one request is in flight; concurrent callers share it. Successful
//! results younger than the configured stale window are served without a
//! new request.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{watch, RwLock};

use crate::domain::errors::{ApiError, ApiResult};

/// Stable identifier for a cached query.
///
/// A fixed scope (`inventory-trend`) or a scope plus parameter
/// (`product-trend:sku-42`). Distinct parameters cache independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: &'static str,
    param: Option<String>,
}

impl QueryKey {
    /// Key with no parameter.
    pub const fn fixed(scope: &'static str) -> Self {
        Self { scope, param: None }
    }

    /// Key scoped by a parameter.
    pub fn scoped(scope: &'static str, param: impl Into<String>) -> Self {
        Self {
            scope,
            param: Some(param.into()),
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}:{}", self.scope, param),
            None => write!(f, "{}", self.scope),
        }
    }
}

/// Query lifecycle status.
///
/// Exactly the three-state lifecycle (plus Idle for disabled queries)
/// of the cache abstraction; nothing here adds states of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No request has been issued and none will be until enabled.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request completed with data.
    Success,
    /// The last request failed.
    Error,
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Snapshot of one query's state.
///
/// `data` holds the last successful value and is retained while a
/// refetch is in flight or after a refetch fails; `error` is set only
/// while the status is [`QueryStatus::Error`].
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    /// Current lifecycle status.
    pub status: QueryStatus,
    /// Last successfully fetched value, if any.
    pub data: Option<T>,
    /// Error from the last attempt, when status is Error.
    pub error: Option<Arc<ApiError>>,
    /// When `data` was last refreshed.
    pub updated_at: Option<Instant>,
}

impl<T> QueryState<T> {
    const fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            updated_at: None,
        }
    }

    /// Whether the status is Success.
    pub const fn is_success(&self) -> bool {
        matches!(self.status, QueryStatus::Success)
    }

    /// Whether the status is Error.
    pub const fn is_error(&self) -> bool {
        matches!(self.status, QueryStatus::Error)
    }
}

/// Handle onto one cached query.
///
/// Snapshot accessors read the current state without waiting; [`changed`]
/// and [`settled`] await transitions. Dropping every handle does not
/// cancel the underlying fetch: the result still lands in the cache
/// entry, it is just unobserved.
///
/// [`changed`]: QueryHandle::changed
/// [`settled`]: QueryHandle::settled
#[derive(Debug, Clone)]
pub struct QueryHandle<T> {
    rx: watch::Receiver<QueryState<T>>,
    /// Sender kept alive for detached (never-fetching) handles so the
    /// channel stays open. Cache-backed handles leave this `None`; their
    /// sender lives in the cache map.
    idle_tx: Option<Arc<watch::Sender<QueryState<T>>>>,
}

impl<T: Clone> QueryHandle<T> {
    fn attached(rx: watch::Receiver<QueryState<T>>) -> Self {
        Self { rx, idle_tx: None }
    }

    /// Handle that is Idle and stays Idle: used when a query's
    /// precondition is not met and no request may be issued.
    pub fn idle() -> Self {
        let (tx, rx) = watch::channel(QueryState::idle());
        Self {
            rx,
            idle_tx: Some(Arc::new(tx)),
        }
    }

    /// Clone of the current state.
    pub fn state(&self) -> QueryState<T> {
        self.rx.borrow().clone()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> QueryStatus {
        self.rx.borrow().status
    }

    /// Last successfully fetched value, if any.
    pub fn data(&self) -> Option<T> {
        self.rx.borrow().data.clone()
    }

    /// Error from the last attempt, if the query is in the Error state.
    pub fn error(&self) -> Option<Arc<ApiError>> {
        self.rx.borrow().error.clone()
    }

    /// Whether the query is idle (disabled, nothing fetched).
    pub fn is_idle(&self) -> bool {
        self.status() == QueryStatus::Idle
    }

    /// Whether a request is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.status() == QueryStatus::Loading
    }

    /// Whether the last request completed with data.
    pub fn is_success(&self) -> bool {
        self.status() == QueryStatus::Success
    }

    /// Whether the last request failed.
    pub fn is_error(&self) -> bool {
        self.status() == QueryStatus::Error
    }

    /// Wait for the next state transition.
    ///
    /// Returns `false` if no further transition can occur.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until the query reaches Success or Error and return that
    /// state.
    ///
    /// A detached Idle handle returns its Idle state immediately: no
    /// request was issued and no transition will ever happen.
    pub async fn settled(&mut self) -> QueryState<T> {
        loop {
            let state = self.state();
            match state.status {
                QueryStatus::Success | QueryStatus::Error => return state,
                QueryStatus::Idle if self.idle_tx.is_some() => return state,
                QueryStatus::Idle | QueryStatus::Loading => {
                    if !self.changed().await {
                        return self.state();
                    }
                }
            }
        }
    }
}

/// Keyed store of query entries.
///
/// Owns the watch senders; handles are receiver clones. The key map is
/// the only shared mutable state and is guarded by an async `RwLock`.
pub struct QueryCache<T> {
    entries: Arc<RwLock<HashMap<QueryKey, watch::Sender<QueryState<T>>>>>,
    stale_after: Duration,
}

impl<T> QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a cache whose successful entries stay fresh for
    /// `stale_after`. A zero duration means every access refetches,
    /// with in-flight deduplication still applying.
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            stale_after,
        }
    }

    /// Get-or-fetch for `key`, returning a handle immediately.
    ///
    /// Under the map lock, exactly one of the following happens:
    /// - the entry is Loading: the in-flight request is shared;
    /// - the entry is Success and younger than the stale window: served
    ///   as-is, no request;
    /// - otherwise (absent, stale, or Error) `fetch` is spawned on a
    ///   detached task; previous data stays on the handle while the
    ///   refetch is in flight.
    pub async fn get_or_fetch<F, Fut>(&self, key: QueryKey, fetch: F) -> QueryHandle<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let mut entries = self.entries.write().await;

        if let Some(tx) = entries.get(&key) {
            let needs_fetch = {
                let state = tx.borrow();
                match state.status {
                    QueryStatus::Loading => false,
                    QueryStatus::Success => state
                        .updated_at
                        .is_none_or(|at| at.elapsed() >= self.stale_after),
                    QueryStatus::Idle | QueryStatus::Error => true,
                }
            };

            let handle = QueryHandle::attached(tx.subscribe());
            if needs_fetch {
                Self::spawn_fetch(key, tx.clone(), fetch());
            }
            return handle;
        }

        let (tx, rx) = watch::channel(QueryState::idle());
        Self::spawn_fetch(key.clone(), tx.clone(), fetch());
        entries.insert(key, tx);
        QueryHandle::attached(rx)
    }

    /// Number of cached keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Transition the entry to Loading and run the fetch on a detached
    /// task. The caller holds the map lock, so the Loading transition is
    /// observed before any concurrent access to the same key.
    fn spawn_fetch<Fut>(key: QueryKey, tx: watch::Sender<QueryState<T>>, fut: Fut)
    where
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        tx.send_modify(|state| {
            state.status = QueryStatus::Loading;
            state.error = None;
        });

        tokio::spawn(async move {
            let result = fut.await;
            tx.send_modify(|state| match result {
                Ok(data) => {
                    tracing::debug!(key = %key, "query settled: success");
                    state.status = QueryStatus::Success;
                    state.data = Some(data);
                    state.error = None;
                    state.updated_at = Some(Instant::now());
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "query settled: error");
                    state.status = QueryStatus::Error;
                    state.error = Some(Arc::new(err));
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_fetch(
        counter: &Arc<AtomicUsize>,
        value: i64,
    ) -> impl Future<Output = ApiResult<Vec<i64>>> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(vec![value])
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let counter = Arc::new(AtomicUsize::new(0));

        let mut first = cache
            .get_or_fetch(QueryKey::fixed("k"), || counting_fetch(&counter, 1))
            .await;
        let mut second = cache
            .get_or_fetch(QueryKey::fixed("k"), || counting_fetch(&counter, 2))
            .await;

        let a = first.settled().await;
        let b = second.settled().await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(a.data, Some(vec![1]));
        assert_eq!(b.data, Some(vec![1]));
    }

    #[tokio::test]
    async fn fresh_entry_is_served_without_refetch() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let counter = Arc::new(AtomicUsize::new(0));

        let mut handle = cache
            .get_or_fetch(QueryKey::fixed("k"), || counting_fetch(&counter, 1))
            .await;
        handle.settled().await;

        let again = cache
            .get_or_fetch(QueryKey::fixed("k"), || counting_fetch(&counter, 2))
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(again.is_success());
        assert_eq!(again.data(), Some(vec![1]));
    }

    #[tokio::test]
    async fn stale_entry_refetches_and_keeps_data_while_loading() {
        let cache = QueryCache::new(Duration::ZERO);
        let counter = Arc::new(AtomicUsize::new(0));

        let mut handle = cache
            .get_or_fetch(QueryKey::fixed("k"), || counting_fetch(&counter, 1))
            .await;
        handle.settled().await;

        let mut again = cache
            .get_or_fetch(QueryKey::fixed("k"), || counting_fetch(&counter, 2))
            .await;

        // Refetch is in flight; the previous value is still visible.
        assert!(again.is_loading());
        assert_eq!(again.data(), Some(vec![1]));

        let state = again.settled().await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(state.data, Some(vec![2]));
    }

    #[tokio::test]
    async fn error_entry_refetches_on_next_access() {
        let cache: QueryCache<Vec<i64>> = QueryCache::new(Duration::from_secs(60));

        let mut failing = cache
            .get_or_fetch(QueryKey::fixed("k"), || async {
                Err(ApiError::Status {
                    status: 500,
                    body: "boom".to_string(),
                })
            })
            .await;
        let state = failing.settled().await;
        assert!(state.is_error());
        assert_eq!(state.data, None);
        assert_eq!(state.error.unwrap().status_code(), Some(500));

        let mut retry = cache
            .get_or_fetch(QueryKey::fixed("k"), || async { Ok(vec![7]) })
            .await;
        let state = retry.settled().await;
        assert!(state.is_success());
        assert_eq!(state.data, Some(vec![7]));
    }

    #[tokio::test]
    async fn detached_idle_handle_never_transitions() {
        let handle: QueryHandle<Vec<i64>> = QueryHandle::idle();
        assert!(handle.is_idle());
        assert_eq!(handle.data(), None);

        // Settles immediately with the Idle state rather than waiting
        // for a transition that cannot happen.
        let mut waiter = handle.clone();
        let state = waiter.settled().await;
        assert_eq!(state.status, QueryStatus::Idle);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(handle.is_idle());
    }

    #[tokio::test]
    async fn distinct_keys_cache_independently() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let counter = Arc::new(AtomicUsize::new(0));

        let mut a = cache
            .get_or_fetch(QueryKey::scoped("product-trend", "a"), || {
                counting_fetch(&counter, 1)
            })
            .await;
        let mut b = cache
            .get_or_fetch(QueryKey::scoped("product-trend", "b"), || {
                counting_fetch(&counter, 2)
            })
            .await;

        a.settled().await;
        b.settled().await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
        assert_eq!(a.data(), Some(vec![1]));
        assert_eq!(b.data(), Some(vec![2]));
    }

    #[test]
    fn query_key_display_includes_param() {
        assert_eq!(QueryKey::fixed("inventory-trend").to_string(), "inventory-trend");
        assert_eq!(
            QueryKey::scoped("product-trend", "sku-42").to_string(),
            "product-trend:sku-42"
        );
    }
}
