//! Deadline error types.

use std::time::Duration;

/// Caller-imposed deadline exceeded.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Timeout Error: {} exceeded {:?} at line {} in {}", operation, budget, line, file)]
pub struct TimeoutError {
    /// Operation that was cut short
    pub operation: String,
    /// Deadline that was exceeded
    pub budget: Duration,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TimeoutError {
    /// Create a new TimeoutError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use rifttrack_error::TimeoutError;
    /// use std::time::Duration;
    ///
    /// let err = TimeoutError::new("aggregate", Duration::from_secs(5));
    /// assert_eq!(err.budget, Duration::from_secs(5));
    /// ```
    #[track_caller]
    pub fn new(operation: impl Into<String>, budget: Duration) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation: operation.into(),
            budget,
            line: location.line(),
            file: location.file(),
        }
    }
}
