//! Upstream API error types.

/// Upstream API error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// Non-2xx response with status code and the message parsed from the body
    #[display("HTTP {} from {}: {}", status, url, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Human-readable message from the error body (raw body if unparseable)
        message: String,
        /// Request URL
        url: String,
    },
    /// Request never produced a response (DNS, TLS, connection reset, client timeout)
    #[display("Request failed: {}", _0)]
    Transport(String),
    /// Response body could not be decoded
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
    /// Response decoded but lacked a field the caller cannot proceed without
    #[display("Response missing required field: {}", _0)]
    MissingField(String),
}

impl UpstreamErrorKind {
    /// HTTP status attached to this failure, if the upstream answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Upstream error with source location tracking.
///
/// # Examples
///
/// ```
/// use rifttrack_error::{UpstreamError, UpstreamErrorKind};
///
/// let err = UpstreamError::new(UpstreamErrorKind::Status {
///     status: 429,
///     message: "Rate limit exceeded".to_string(),
///     url: "https://asia.api.riotgames.com/lol/match/v5/matches/KR_1".to_string(),
/// });
/// assert!(err.is_rate_limited());
/// assert_eq!(err.status(), Some(429));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: {} at line {} in {}", kind, line, file)]
pub struct UpstreamError {
    /// The kind of error that occurred
    pub kind: UpstreamErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// HTTP status attached to this failure, if any.
    pub fn status(&self) -> Option<u16> {
        self.kind.status()
    }

    /// True for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True for a 429 response.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
