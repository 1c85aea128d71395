//! Fail-open cache store.

use crate::{BackendKind, CacheBackend, CacheConfig, CacheKey, MemoryBackend, RedisBackend};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Process-wide cache handle that never fails.
///
/// Every backend error is logged and absorbed here: `get` degrades to a miss and `set`
/// to a no-op. Cloning is cheap and shares the backend (and its connection).
///
/// # Example
///
/// ```
/// use rifttrack_cache::{CacheKey, CacheStore, MemoryBackend};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = CacheStore::new(Arc::new(MemoryBackend::new(100)));
/// let key = CacheKey::new("tft:match", "KR_42");
///
/// store.set(&key, "{\"placement\":1}".to_string(), Duration::from_secs(60)).await;
/// assert!(store.get(&key).await.is_some());
/// # }
/// ```
#[derive(Clone)]
pub struct CacheStore {
    backend: Option<Arc<dyn CacheBackend>>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .finish()
    }
}

impl CacheStore {
    /// Wrap a backend.
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A store that always misses and never writes.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Build the store described by `config`. Redis connects lazily on first use.
    pub fn from_config(config: &CacheConfig) -> Self {
        if !*config.enabled() {
            debug!("Cache disabled by configuration");
            return Self::disabled();
        }

        let backend: Arc<dyn CacheBackend> = match config.backend() {
            BackendKind::Redis => Arc::new(
                RedisBackend::new(
                    config.url().clone(),
                    Duration::from_secs(*config.connect_timeout_secs()),
                )
                .with_reconnect_backoff(Duration::from_secs(*config.reconnect_backoff_secs())),
            ),
            BackendKind::Memory => Arc::new(MemoryBackend::new(*config.max_entries())),
        };
        debug!(backend = backend.name(), "Created cache store");
        Self::new(backend)
    }

    /// Whether a backend is attached.
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Read raw text, `None` on miss or on any backend failure.
    pub async fn get(&self, key: &CacheKey) -> Option<String> {
        let backend = self.backend.as_ref()?;
        let key = key.to_string();
        match backend.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, backend = backend.name(), error = %e, "Cache get failed, treating as miss");
                None
            }
        }
    }

    /// Store raw text; failures are logged and dropped.
    pub async fn set(&self, key: &CacheKey, value: String, ttl: Duration) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        let key = key.to_string();
        if let Err(e) = backend.set(&key, value, ttl).await {
            warn!(key = %key, backend = backend.name(), error = %e, "Cache set failed, continuing without it");
        }
    }

    /// Read and decode JSON, `None` on miss, backend failure, unparseable text or a stored
    /// JSON `null`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let text = self.get(key).await?;
        if text.trim() == "null" {
            debug!(key = %key, "Cached payload is null, treating as miss");
            return None;
        }
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Cached payload unparseable, treating as miss");
                None
            }
        }
    }

    /// Encode as JSON and store; encode or backend failures are logged and dropped.
    ///
    /// A value that encodes to `null` is an empty upstream answer and is not stored.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T, ttl: Duration) {
        if !self.is_enabled() {
            return;
        }
        match serde_json::to_string(value) {
            Ok(text) if text == "null" => debug!(key = %key, "Not caching null payload"),
            Ok(text) => self.set(key, text, ttl).await,
            Err(e) => warn!(key = %key, error = %e, "Failed to encode payload for cache"),
        }
    }
}
