//! Layered configuration.
//!
//! Precedence, lowest to highest:
//! - Bundled defaults (include_str! from rifttrack.toml)
//! - `~/.config/rifttrack/rifttrack.toml`
//! - `./rifttrack.toml`, or the file passed with `--config`
//! - `RIFTTRACK__<SECTION>__<KEY>` environment variables
//! - `REDIS_URL` for `cache.url`

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use derive_getters::Getters;
use rifttrack_cache::CacheConfig;
use rifttrack_error::{ConfigError, RiftResult};
use rifttrack_history::ScanSettings;
use rifttrack_riot::{RiotConfig, RiotId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG: &str = include_str!("../rifttrack.toml");

/// Complete rifttrack configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct RiftConfig {
    /// Riot API hosts and HTTP settings
    #[serde(default)]
    riot: RiotConfig,
    /// Match record cache
    #[serde(default)]
    cache: CacheConfig,
    /// League of Legends scan settings
    #[serde(default)]
    lol: ScanSettings,
    /// TFT scan settings
    #[serde(default)]
    tft: ScanSettings,
    /// Saved Riot IDs by name, as `gameName#tagLine`
    #[serde(default)]
    presets: BTreeMap<String, String>,
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn with_environment(
    builder: ConfigBuilder<DefaultState>,
) -> RiftResult<ConfigBuilder<DefaultState>> {
    let builder = builder.add_source(
        Environment::with_prefix("RIFTTRACK")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    let redis_url = std::env::var("REDIS_URL")
        .ok()
        .filter(|url| !url.trim().is_empty());
    builder
        .set_override_option("cache.url", redis_url)
        .map_err(|e| ConfigError::new(format!("Invalid REDIS_URL: {}", e)).into())
}

fn finish(builder: ConfigBuilder<DefaultState>) -> RiftResult<RiftConfig> {
    let config = builder
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
    Ok(config)
}

impl RiftConfig {
    /// Load from the bundled defaults, user and working-directory files, and environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a file is malformed or a value has the wrong type.
    pub fn load() -> RiftResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/rifttrack/rifttrack.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("rifttrack").required(false));

        finish(with_environment(builder)?)
    }

    /// Load from the bundled defaults, then `path` (which must exist), then environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `path` is missing or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> RiftResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration from explicit file");
        let builder = defaults().add_source(File::from(path).required(true));
        finish(with_environment(builder)?)
    }

    /// Layer a TOML document over the bundled defaults, ignoring files and environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the document is malformed.
    pub fn from_toml_str(toml: &str) -> RiftResult<Self> {
        finish(defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Resolve a saved Riot ID by preset name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown name or a malformed entry.
    pub fn preset(&self, name: &str) -> RiftResult<RiotId> {
        let Some(value) = self.presets.get(name) else {
            let known: Vec<&str> = self.presets.keys().map(String::as_str).collect();
            return Err(ConfigError::new(format!(
                "Unknown preset '{}' (known: {})",
                name,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            ))
            .into());
        };
        Ok(value.parse::<RiotId>()?)
    }
}
