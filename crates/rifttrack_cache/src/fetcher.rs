//! Cache-aside fetch primitive.

use crate::{CacheKey, CacheStore, MetricsSink};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// A fetched value and whether it came from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    value: T,
    served_from_cache: bool,
}

impl<T> FetchResult<T> {
    /// The fetched value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// True when no upstream call was made.
    pub fn served_from_cache(&self) -> bool {
        self.served_from_cache
    }

    /// Take the value.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Get-or-fetch-and-store over a [`CacheStore`].
///
/// Concurrent misses for the same key are not coalesced; each caller fetches
/// upstream. Records are immutable, so the duplicate writes agree.
#[derive(Debug, Clone)]
pub struct CacheAsideFetcher {
    store: CacheStore,
}

impl CacheAsideFetcher {
    /// Create a fetcher over `store`.
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Return the cached value for `namespace:id`, or call `fetch`, store its result
    /// for `ttl` and return it.
    ///
    /// Cache failures never surface. A failure from `fetch` is returned unchanged and
    /// nothing is written.
    ///
    /// # Example
    ///
    /// ```
    /// use rifttrack_cache::{CacheAsideFetcher, CacheStore, MemoryBackend, NoopMetrics};
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let fetcher = CacheAsideFetcher::new(CacheStore::new(Arc::new(MemoryBackend::new(10))));
    /// let ttl = Duration::from_secs(60);
    ///
    /// let first = fetcher
    ///     .fetch_with_cache("lol:match", "KR_1", ttl, &NoopMetrics, || async {
    ///         Ok::<_, std::io::Error>(vec![1, 2, 3])
    ///     })
    ///     .await
    ///     .unwrap();
    /// assert!(!first.served_from_cache());
    ///
    /// let second = fetcher
    ///     .fetch_with_cache("lol:match", "KR_1", ttl, &NoopMetrics, || async {
    ///         Ok::<Vec<i32>, std::io::Error>(unreachable!())
    ///     })
    ///     .await
    ///     .unwrap();
    /// assert!(second.served_from_cache());
    /// assert_eq!(second.value(), first.value());
    /// # }
    /// ```
    #[instrument(skip(self, metrics, fetch))]
    pub async fn fetch_with_cache<T, E, F, Fut>(
        &self,
        namespace: &str,
        id: &str,
        ttl: Duration,
        metrics: &dyn MetricsSink,
        fetch: F,
    ) -> Result<FetchResult<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = CacheKey::new(namespace, id);

        let lookup_started = Instant::now();
        let cached = self.store.get_json::<T>(&key).await;
        let lookup_elapsed = lookup_started.elapsed();
        metrics.record_cache_lookup(cached.is_some(), lookup_elapsed);

        if let Some(value) = cached {
            debug!(
                key = %key,
                lookup_ms = lookup_elapsed.as_millis() as u64,
                "Cache hit"
            );
            return Ok(FetchResult {
                value,
                served_from_cache: true,
            });
        }

        debug!(key = %key, "Cache miss, fetching upstream");

        let fetch_started = Instant::now();
        let value = match fetch().await {
            Ok(value) => value,
            Err(e) => {
                metrics.record_upstream_failure();
                return Err(e);
            }
        };
        let fetch_elapsed = fetch_started.elapsed();
        metrics.record_upstream_fetch(fetch_elapsed);
        debug!(
            key = %key,
            upstream_ms = fetch_elapsed.as_millis() as u64,
            "Fetched upstream"
        );

        self.store.set_json(&key, &value, ttl).await;
        debug!(key = %key, ttl_secs = ttl.as_secs(), "Stored in cache");

        Ok(FetchResult {
            value,
            served_from_cache: false,
        })
    }
}
