//! Cache backend error types.

/// Kinds of cache backend errors.
///
/// These never reach callers of the cache-aside layer; the store logs and absorbs them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CacheErrorKind {
    /// Could not open or establish the backend connection
    #[display("Cache connection failed: {}", _0)]
    Connection(String),
    /// A GET or SET command failed on an open connection
    #[display("Cache command failed: {}", _0)]
    Command(String),
    /// Cached text could not be encoded or decoded
    #[display("Cache serialization failed: {}", _0)]
    Serialization(String),
}

/// Cache error with location tracking.
///
/// # Examples
///
/// ```
/// use rifttrack_error::{CacheError, CacheErrorKind};
///
/// let err = CacheError::new(CacheErrorKind::Connection("refused".to_string()));
/// assert!(format!("{}", err).contains("connection failed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    /// The kind of error that occurred
    pub kind: CacheErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CacheError {
    /// Create a new cache error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
