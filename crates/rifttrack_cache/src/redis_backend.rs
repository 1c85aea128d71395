//! Redis backend with a lazily opened multiplexed connection.

use crate::CacheBackend;
use async_trait::async_trait;
use parking_lot::Mutex;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use rifttrack_error::{CacheError, CacheErrorKind};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

const DEFAULT_RECONNECT_BACKOFF: Duration = Duration::from_secs(30);

/// Redis-backed cache.
///
/// The connection is opened on first use and shared by every caller afterwards. The
/// multiplexed connection pipelines concurrent commands over one socket, so no lock is
/// held across a round trip.
///
/// A failed connect is remembered: for the reconnect back-off that follows, commands fail
/// immediately instead of waiting out another connect timeout.
pub struct RedisBackend {
    url: String,
    connect_timeout: Duration,
    reconnect_backoff: Duration,
    conn: OnceCell<MultiplexedConnection>,
    last_failure: Mutex<Option<Instant>>,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("url", &self.url)
            .field("connect_timeout", &self.connect_timeout)
            .field("reconnect_backoff", &self.reconnect_backoff)
            .field("connected", &self.conn.initialized())
            .finish()
    }
}

impl RedisBackend {
    /// Create a backend for `url`. No connection is made until the first command.
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
            reconnect_backoff: DEFAULT_RECONNECT_BACKOFF,
            conn: OnceCell::new(),
            last_failure: Mutex::new(None),
        }
    }

    /// How long to skip connect attempts after one fails.
    pub fn with_reconnect_backoff(mut self, backoff: Duration) -> Self {
        self.reconnect_backoff = backoff;
        self
    }

    /// Whether the lazy connection has been established.
    pub fn is_connected(&self) -> bool {
        self.conn.initialized()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn connect(&self) -> Result<MultiplexedConnection, CacheError> {
        let client = Client::open(self.url.as_str()).map_err(|e| {
            CacheError::new(CacheErrorKind::Connection(format!(
                "Invalid Redis URL: {}",
                e
            )))
        })?;

        let conn = tokio::time::timeout(
            self.connect_timeout,
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            CacheError::new(CacheErrorKind::Connection(format!(
                "Timed out after {:?}",
                self.connect_timeout
            )))
        })?
        .map_err(|e| CacheError::new(CacheErrorKind::Connection(e.to_string())))?;

        info!("Redis ready");
        Ok(conn)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn.clone());
        }

        let last_failure = *self.last_failure.lock();
        if let Some(failed_at) = last_failure {
            let since = failed_at.elapsed();
            if since < self.reconnect_backoff {
                return Err(CacheError::new(CacheErrorKind::Connection(format!(
                    "Backing off, last connect failed {:?} ago",
                    since
                ))));
            }
        }

        match self.conn.get_or_try_init(|| self.connect()).await {
            Ok(conn) => {
                *self.last_failure.lock() = None;
                Ok(conn.clone())
            }
            Err(e) => {
                warn!(
                    backoff_secs = self.reconnect_backoff.as_secs(),
                    error = %e,
                    "Redis connect failed, backing off"
                );
                *self.last_failure.lock() = Some(Instant::now());
                Err(e)
            }
        }
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::new(CacheErrorKind::Command(format!("GET {}: {}", key, e))))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        // SET EX rejects zero
        let seconds = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, seconds).await.map_err(|e| {
            CacheError::new(CacheErrorKind::Command(format!("SETEX {}: {}", key, e)))
        })?;
        debug!(key, seconds, "Stored key in Redis");
        Ok(())
    }
}
