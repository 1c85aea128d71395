//! Tracing subscriber setup.
//!
//! Stdout carries only the report, so every log line goes to stderr.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Shape of emitted log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Log filter and format for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Filter directive, e.g. `info` or `rifttrack_history=trace,info`
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl ObservabilityConfig {
    /// Filter from `RUST_LOG` when set and non-empty, otherwise `info`.
    pub fn new() -> Self {
        let filter = std::env::var("RUST_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());
        Self {
            filter,
            format: LogFormat::Text,
        }
    }

    /// Replace the filter directive.
    pub fn with_log_level(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Switch to JSON output when `enabled`.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.format = if enabled {
            LogFormat::Json
        } else {
            LogFormat::Text
        };
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init_observability_with_config(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(&config.filter)?;

    let output = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(output)
        .try_init()?;

    Ok(())
}
