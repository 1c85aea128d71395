//! Cache store configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Which backend the cache store talks to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    /// Remote Redis server
    #[default]
    Redis,
    /// In-process TTL map (not shared across processes)
    Memory,
}

/// Configuration for the cache store.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheConfig {
    /// Redis connection URL
    #[serde(default = "default_url")]
    #[builder(default = "default_url()")]
    url: String,

    /// Backend kind
    #[serde(default)]
    #[builder(default)]
    backend: BackendKind,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,

    /// Seconds to wait for the lazy connection before treating the cache as down
    #[serde(default = "default_connect_timeout_secs")]
    #[builder(default = "default_connect_timeout_secs()")]
    connect_timeout_secs: u64,

    /// Seconds to skip connect attempts after one fails
    #[serde(default = "default_reconnect_backoff_secs")]
    #[builder(default = "default_reconnect_backoff_secs()")]
    reconnect_backoff_secs: u64,

    /// Maximum entries held by the memory backend
    #[serde(default = "default_max_entries")]
    #[builder(default = "default_max_entries()")]
    max_entries: usize,
}

fn default_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_connect_timeout_secs() -> u64 {
    3
}

fn default_reconnect_backoff_secs() -> u64 {
    30
}

fn default_max_entries() -> usize {
    10_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            backend: BackendKind::default(),
            enabled: default_enabled(),
            connect_timeout_secs: default_connect_timeout_secs(),
            reconnect_backoff_secs: default_reconnect_backoff_secs(),
            max_entries: default_max_entries(),
        }
    }
}
