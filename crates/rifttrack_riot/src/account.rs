//! Riot account DTOs.

use derive_getters::Getters;
use rifttrack_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A Riot ID: `gameName#tagLine`.
///
/// # Example
///
/// ```
/// use rifttrack_riot::RiotId;
///
/// let id: RiotId = "Hide on bush#KR1".parse().unwrap();
/// assert_eq!(id.game_name(), "Hide on bush");
/// assert_eq!(id.tag_line(), "KR1");
/// assert_eq!(id.to_string(), "Hide on bush#KR1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_more::Display)]
#[display("{}#{}", game_name, tag_line)]
pub struct RiotId {
    /// Name part
    game_name: String,
    /// Tag part, without the `#`
    tag_line: String,
}

impl RiotId {
    /// Build a Riot ID from its parts, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either part is empty.
    #[track_caller]
    pub fn new(game_name: &str, tag_line: &str) -> Result<Self, ConfigError> {
        let game_name = game_name.trim();
        let tag_line = tag_line.trim().trim_start_matches('#');
        if game_name.is_empty() || tag_line.is_empty() {
            return Err(ConfigError::new(format!(
                "Invalid Riot ID '{}#{}': name and tag are both required",
                game_name, tag_line
            )));
        }
        Ok(Self {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }
}

impl FromStr for RiotId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('#') {
            Some((game_name, tag_line)) => Self::new(game_name, tag_line),
            None => Err(ConfigError::new(format!(
                "Invalid Riot ID '{}': expected gameName#tagLine",
                s
            ))),
        }
    }
}

/// A resolved Riot account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Player-universal id used by every match and league endpoint
    puuid: String,
    /// Riot ID name part
    game_name: String,
    /// Riot ID tag part
    tag_line: String,
}

impl Account {
    /// Create an account.
    pub fn new(
        puuid: impl Into<String>,
        game_name: impl Into<String>,
        tag_line: impl Into<String>,
    ) -> Self {
        Self {
            puuid: puuid.into(),
            game_name: game_name.into(),
            tag_line: tag_line.into(),
        }
    }

    /// `gameName#tagLine`.
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Account response as sent by Riot; every field may be absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountResponse {
    pub(crate) puuid: Option<String>,
    pub(crate) game_name: Option<String>,
    pub(crate) tag_line: Option<String>,
}
