//! Error types for rifttrack.
//!
//! This crate provides the foundation error types used throughout the rifttrack workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use rifttrack_error::{RiftResult, UpstreamError, UpstreamErrorKind};
//!
//! fn fetch_account() -> RiftResult<String> {
//!     Err(UpstreamError::new(UpstreamErrorKind::Transport(
//!         "connection refused".to_string(),
//!     )))?
//! }
//!
//! match fetch_account() {
//!     Ok(puuid) => println!("Got: {}", puuid),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod timeout;
mod upstream;

pub use cache::{CacheError, CacheErrorKind};
pub use config::ConfigError;
pub use error::{RiftError, RiftErrorKind, RiftResult};
pub use timeout::TimeoutError;
pub use upstream::{UpstreamError, UpstreamErrorKind, UpstreamResult};
