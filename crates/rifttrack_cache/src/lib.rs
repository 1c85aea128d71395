//! Cache-aside layer for immutable upstream records.
//!
//! This crate provides a fail-open [`CacheStore`] over a pluggable [`CacheBackend`]
//! (Redis in production, an in-process TTL map for tests and cache-less deployments),
//! and the [`CacheAsideFetcher`] primitive that checks the store before calling upstream
//! and writes fetched values back with a TTL.
//!
//! Backend failures never escape the store: a cache outage degrades to "always fetch
//! upstream" instead of failing the caller.

#![warn(missing_docs)]

mod backend;
mod config;
mod fetcher;
mod key;
mod memory;
mod metrics;
mod redis_backend;
mod store;

pub use backend::CacheBackend;
pub use config::{BackendKind, CacheConfig, CacheConfigBuilder};
pub use fetcher::{CacheAsideFetcher, FetchResult};
pub use key::CacheKey;
pub use memory::MemoryBackend;
pub use metrics::{FetchMetrics, MetricsSink, MetricsSnapshot, NoopMetrics};
pub use redis_backend::RedisBackend;
pub use store::CacheStore;
