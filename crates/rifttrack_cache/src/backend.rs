//! Fallible cache backend trait.

use async_trait::async_trait;
use rifttrack_error::CacheError;
use std::time::Duration;

/// Raw key/value backend with per-key TTL.
///
/// Implementations report every failure. They are never called directly by the
/// cache-aside layer; [`CacheStore`](crate::CacheStore) wraps them and absorbs errors.
///
/// Implementations must be safe to call concurrently from many tasks.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Backend name for logs (e.g. "redis", "memory").
    fn name(&self) -> &'static str;

    /// Read the text stored under `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
