//! rifttrack - ranked match history for League of Legends and TFT
//!
//! rifttrack resolves a Riot ID, looks up the player's ranked standing, and scans their
//! recent matches for ranked games. Match records are immutable, so each one is fetched
//! from the Riot API at most once per cache TTL; every other lookup is served from Redis
//! (or an in-process cache). Upstream calls are paced with a fixed delay and the scan stops
//! as soon as enough ranked games are found.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rifttrack::{FetchMetrics, RecordService, RiftConfig, RiotId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RiftConfig::load()?;
//!     let service = RecordService::from_config(&config)?;
//!     let metrics = FetchMetrics::new();
//!
//!     let riot_id: RiotId = "Hide on bush#KR1".parse()?;
//!     let record = service.lol_record(&riot_id, &metrics).await?;
//!     print!("{}", record);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `rifttrack_error` - Error types
//! - `rifttrack_cache` - Fail-open cache store and cache-aside fetcher
//! - `rifttrack_riot` - Riot API client and DTOs
//! - `rifttrack_history` - Sequential, paced history aggregation
//!
//! This crate re-exports everything and adds configuration, logging setup, record lookups
//! and report formatting.

#![warn(missing_docs)]

mod config;
mod observability;
mod report;
mod service;

pub use config::RiftConfig;
pub use observability::{LogFormat, ObservabilityConfig, init_observability_with_config};
pub use report::{failure_message, lol_game_line, placement_keycap, tier_line};
pub use service::{Game, LolRecord, RecordService, TftRecord};

pub use rifttrack_cache::*;
pub use rifttrack_error::*;
pub use rifttrack_history::*;
pub use rifttrack_riot::*;
