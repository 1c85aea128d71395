//! Top-level error wrapper types.

use crate::{CacheError, ConfigError, TimeoutError, UpstreamError};

/// Every failure kind a rifttrack operation can surface.
///
/// # Examples
///
/// ```
/// use rifttrack_error::{RiftError, RiftErrorKind, UpstreamError, UpstreamErrorKind};
///
/// let upstream = UpstreamError::new(UpstreamErrorKind::Transport("reset".to_string()));
/// let err: RiftError = upstream.into();
/// assert!(matches!(err.kind(), RiftErrorKind::Upstream(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RiftErrorKind {
    /// Upstream API failure
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// Cache backend failure from a direct backend call
    #[from(CacheError)]
    Cache(CacheError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Deadline exceeded
    #[from(TimeoutError)]
    Timeout(TimeoutError),
}

/// rifttrack error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rifttrack Error: {}", _0)]
pub struct RiftError(Box<RiftErrorKind>);

impl RiftError {
    /// Create a new error from a kind.
    pub fn new(kind: RiftErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RiftErrorKind {
        &self.0
    }

    /// HTTP status of the underlying upstream failure, if there is one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self.kind() {
            RiftErrorKind::Upstream(e) => e.status(),
            _ => None,
        }
    }

    /// True when the failure was a caller deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind(), RiftErrorKind::Timeout(_))
    }
}

impl<T> From<T> for RiftError
where
    T: Into<RiftErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for rifttrack operations.
pub type RiftResult<T> = std::result::Result<T, RiftError>;
