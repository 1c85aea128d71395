//! In-process TTL backend.

use crate::CacheBackend;
use async_trait::async_trait;
use parking_lot::Mutex;
use rifttrack_error::CacheError;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::time::Instant;

/// Cached text with its expiration.
#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    created_at: Instant,
    ttl: Duration,
}

impl MemoryEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, MemoryEntry>,
    access_order: VecDeque<String>,
}

impl Entries {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
        self.access_order.push_back(key.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.pop_front() {
            tracing::debug!(key = %key, "Evicting LRU entry");
            self.map.remove(&key);
        }
    }
}

/// TTL map living inside the process.
///
/// Used when no Redis is available and as the backing store in tests. Entries are
/// evicted least-recently-used once `max_entries` is reached.
///
/// # Example
///
/// ```
/// use rifttrack_cache::{CacheBackend, MemoryBackend};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let backend = MemoryBackend::new(100);
/// backend
///     .set("lol:match:KR_1", "{}".to_string(), Duration::from_secs(60))
///     .await
///     .unwrap();
/// assert_eq!(
///     backend.get("lol:match:KR_1").await.unwrap().as_deref(),
///     Some("{}")
/// );
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryBackend {
    max_entries: usize,
    entries: Mutex<Entries>,
}

impl MemoryBackend {
    /// Create an empty backend holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        tracing::debug!(max_entries, "Creating new MemoryBackend");
        Self {
            max_entries: max_entries.max(1),
            entries: Mutex::new(Entries::default()),
        }
    }

    /// Remove expired entries.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.lock();
        let expired: Vec<String> = entries
            .map
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.remove(key);
        }
        if !expired.is_empty() {
            tracing::info!(
                removed = expired.len(),
                remaining = entries.map.len(),
                "Cleaned up expired cache entries"
            );
        }
        expired.len()
    }

    /// Get number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    /// Check if the backend is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().map.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock();

        let (value, expired, remaining) = match entries.map.get(key) {
            Some(entry) => (entry.value.clone(), entry.is_expired(), entry.time_remaining()),
            None => return Ok(None),
        };
        if expired {
            tracing::debug!(key, "Cache entry expired, removing");
            entries.remove(key);
            return Ok(None);
        }

        tracing::trace!(key, time_remaining = ?remaining, "Memory cache hit");
        entries.touch(key);
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock();

        if entries.map.len() >= self.max_entries && !entries.map.contains_key(key) {
            entries.evict_lru();
        }

        entries.touch(key);
        entries.map.insert(
            key.to_string(),
            MemoryEntry {
                value,
                created_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }
}
