//! Explicit metrics sinks for cache-aside scans.
//!
//! Callers create a sink per operation (or share one deliberately) and pass it down;
//! nothing here is process-global.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Receives timing and counting events from the fetcher and aggregator.
pub trait MetricsSink: Send + Sync {
    /// A cache lookup finished.
    fn record_cache_lookup(&self, hit: bool, elapsed: Duration);

    /// An upstream fetch finished successfully.
    fn record_upstream_fetch(&self, elapsed: Duration);

    /// An upstream fetch failed.
    fn record_upstream_failure(&self);

    /// The aggregator slept to pace upstream calls.
    fn record_pacing(&self, delay: Duration);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn record_cache_lookup(&self, _hit: bool, _elapsed: Duration) {}
    fn record_upstream_fetch(&self, _elapsed: Duration) {}
    fn record_upstream_failure(&self) {}
    fn record_pacing(&self, _delay: Duration) {}
}

/// Counting sink for fetch and pacing activity.
///
/// Cloning shares the same counters.
///
/// # Example
///
/// ```
/// use rifttrack_cache::{FetchMetrics, MetricsSink};
/// use std::time::Duration;
///
/// let metrics = FetchMetrics::new();
/// metrics.record_cache_lookup(true, Duration::from_millis(2));
/// metrics.record_pacing(Duration::from_millis(150));
///
/// let snapshot = metrics.snapshot();
/// assert_eq!(snapshot.cache_hits, 1);
/// assert_eq!(snapshot.pacing_ms, 150);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FetchMetrics {
    inner: Arc<FetchMetricsInner>,
}

#[derive(Debug, Default)]
struct FetchMetricsInner {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_lookup_micros: AtomicU64,
    upstream_fetches: AtomicU64,
    upstream_failures: AtomicU64,
    upstream_micros: AtomicU64,
    pacing_waits: AtomicU64,
    pacing_micros: AtomicU64,
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl FetchMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets cache hit count.
    pub fn cache_hits(&self) -> u64 {
        self.inner.cache_hits.load(Ordering::Relaxed)
    }

    /// Gets cache miss count.
    pub fn cache_misses(&self) -> u64 {
        self.inner.cache_misses.load(Ordering::Relaxed)
    }

    /// Gets successful upstream fetch count.
    pub fn upstream_fetches(&self) -> u64 {
        self.inner.upstream_fetches.load(Ordering::Relaxed)
    }

    /// Gets failed upstream fetch count.
    pub fn upstream_failures(&self) -> u64 {
        self.inner.upstream_failures.load(Ordering::Relaxed)
    }

    /// Gets number of pacing sleeps.
    pub fn pacing_waits(&self) -> u64 {
        self.inner.pacing_waits.load(Ordering::Relaxed)
    }

    /// Gets total time spent pacing.
    pub fn pacing_total(&self) -> Duration {
        Duration::from_micros(self.inner.pacing_micros.load(Ordering::Relaxed))
    }

    /// Gets cache hit ratio (0.0 - 1.0), `None` before any lookup.
    pub fn hit_ratio(&self) -> Option<f64> {
        let hits = self.cache_hits();
        let total = hits + self.cache_misses();
        (total > 0).then(|| hits as f64 / total as f64)
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cache_hits: self.cache_hits(),
            cache_misses: self.cache_misses(),
            cache_lookup_ms: self.inner.cache_lookup_micros.load(Ordering::Relaxed) / 1000,
            upstream_fetches: self.upstream_fetches(),
            upstream_failures: self.upstream_failures(),
            upstream_ms: self.inner.upstream_micros.load(Ordering::Relaxed) / 1000,
            pacing_waits: self.pacing_waits(),
            pacing_ms: self.inner.pacing_micros.load(Ordering::Relaxed) / 1000,
            hit_ratio: self.hit_ratio(),
        }
    }
}

impl MetricsSink for FetchMetrics {
    fn record_cache_lookup(&self, hit: bool, elapsed: Duration) {
        if hit {
            self.inner.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.inner.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
        self.inner
            .cache_lookup_micros
            .fetch_add(micros(elapsed), Ordering::Relaxed);
    }

    fn record_upstream_fetch(&self, elapsed: Duration) {
        self.inner.upstream_fetches.fetch_add(1, Ordering::Relaxed);
        self.inner
            .upstream_micros
            .fetch_add(micros(elapsed), Ordering::Relaxed);
    }

    fn record_upstream_failure(&self) {
        self.inner.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn record_pacing(&self, delay: Duration) {
        self.inner.pacing_waits.fetch_add(1, Ordering::Relaxed);
        self.inner
            .pacing_micros
            .fetch_add(micros(delay), Ordering::Relaxed);
    }
}

/// Serializable snapshot of fetch metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Lookups answered by the cache
    pub cache_hits: u64,
    /// Lookups that fell through to upstream
    pub cache_misses: u64,
    /// Total cache lookup time in milliseconds
    pub cache_lookup_ms: u64,
    /// Successful upstream fetches
    pub upstream_fetches: u64,
    /// Failed upstream fetches
    pub upstream_failures: u64,
    /// Total upstream fetch time in milliseconds
    pub upstream_ms: u64,
    /// Number of pacing sleeps
    pub pacing_waits: u64,
    /// Total pacing time in milliseconds
    pub pacing_ms: u64,
    /// Hit ratio, absent before any lookup
    pub hit_ratio: Option<f64>,
}
