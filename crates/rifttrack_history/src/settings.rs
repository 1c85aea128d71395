//! Per-game scan knobs.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How far back to look, how many outcomes to keep, and how to pace and cache.
///
/// # Example
///
/// ```
/// use rifttrack_history::ScanSettings;
/// use std::time::Duration;
///
/// let settings = ScanSettings::default().with_target_limit(5);
/// assert_eq!(*settings.window_size(), 30);
/// assert_eq!(settings.inter_request_delay(), Duration::from_millis(150));
/// assert_eq!(settings.deadline(), None);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct ScanSettings {
    /// Candidate ids requested from upstream
    #[serde(default = "default_window_size")]
    #[builder(default = "default_window_size()")]
    window_size: usize,

    /// Outcomes to collect before stopping
    #[serde(default = "default_target_limit")]
    #[builder(default = "default_target_limit()")]
    target_limit: usize,

    /// Cache TTL for fetched records, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    #[builder(default = "default_cache_ttl_secs()")]
    cache_ttl_secs: u64,

    /// Pause after every record fetched from upstream, in milliseconds
    #[serde(default = "default_inter_request_delay_ms")]
    #[builder(default = "default_inter_request_delay_ms()")]
    inter_request_delay_ms: u64,

    /// Overall budget for one scan, in seconds
    #[serde(default)]
    #[builder(default)]
    #[setters(strip_option)]
    deadline_secs: Option<u64>,
}

fn default_window_size() -> usize {
    30
}

fn default_target_limit() -> usize {
    10
}

fn default_cache_ttl_secs() -> u64 {
    // One week; match records never change
    60 * 60 * 24 * 7
}

fn default_inter_request_delay_ms() -> u64 {
    150
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            target_limit: default_target_limit(),
            cache_ttl_secs: default_cache_ttl_secs(),
            inter_request_delay_ms: default_inter_request_delay_ms(),
            deadline_secs: None,
        }
    }
}

impl ScanSettings {
    /// Cache TTL as a duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Pacing delay as a duration.
    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }

    /// Overall deadline, if one is set.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}
