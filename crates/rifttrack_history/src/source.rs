//! Upstream record sources.

use async_trait::async_trait;
use rifttrack_error::UpstreamResult;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Where candidate ids and records come from.
///
/// Each method is a single upstream call with no retry. Records must be immutable once
/// published, since they are cached by id.
///
/// Records travel as the raw upstream JSON so the cache holds exactly what upstream sent;
/// they are decoded into [`Record`](Self::Record) only after the cache-aside step.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Typed view decoded from a raw payload.
    type Record: DeserializeOwned + Send + Sync;

    /// Cache namespace, e.g. `lol:match`.
    fn namespace(&self) -> &str;

    /// Most recent record ids for `actor_id`, newest first, at most `window_size`.
    async fn list_candidates(&self, actor_id: &str, window_size: usize)
    -> UpstreamResult<Vec<String>>;

    /// One record by id, unmodified. JSON `null` means upstream had nothing to return.
    async fn fetch_payload(&self, record_id: &str) -> UpstreamResult<Value>;
}
