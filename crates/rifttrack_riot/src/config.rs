//! Riot client configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Hosts and HTTP settings for [`RiotClient`](crate::RiotClient).
///
/// The API key is deliberately absent; it comes from `RIOT_API_KEY`.
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
#[builder(setter(into))]
pub struct RiotConfig {
    /// Regional routing host for account and match endpoints
    #[serde(default = "default_regional_url")]
    #[builder(default = "default_regional_url()")]
    regional_url: String,

    /// Platform host for league endpoints
    #[serde(default = "default_platform_url")]
    #[builder(default = "default_platform_url()")]
    platform_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    #[builder(default = "default_request_timeout_secs()")]
    request_timeout_secs: u64,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    #[builder(default = "default_user_agent()")]
    user_agent: String,
}

fn default_regional_url() -> String {
    "https://asia.api.riotgames.com".to_string()
}

fn default_platform_url() -> String {
    "https://kr.api.riotgames.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("rifttrack/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            regional_url: default_regional_url(),
            platform_url: default_platform_url(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}
