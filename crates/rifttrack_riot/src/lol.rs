//! League of Legends match DTOs.
//!
//! Only the fields rifttrack reads are modeled. Everything defaults when absent so a
//! trimmed or older payload still decodes.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Ranked Solo/Duo queue id.
pub const LOL_RANKED_SOLO_QUEUE: u32 = 420;

/// Ranked Flex queue id.
pub const LOL_RANKED_FLEX_QUEUE: u32 = 440;

/// A League of Legends match (`/lol/match/v5/matches/{id}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct LolMatch {
    /// Match metadata
    #[serde(default)]
    metadata: LolMatchMetadata,
    /// Match details
    #[serde(default)]
    info: LolMatchInfo,
}

/// Match metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct LolMatchMetadata {
    /// Match id, e.g. `KR_7001234567`
    #[serde(default)]
    match_id: String,
}

/// Match details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct LolMatchInfo {
    /// Queue the match was played in
    #[serde(default)]
    queue_id: Option<u32>,
    /// Game start in epoch milliseconds
    #[serde(default)]
    game_start_timestamp: Option<i64>,
    /// Ten participants
    #[serde(default)]
    participants: Vec<LolParticipant>,
}

/// One player's line in a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct LolParticipant {
    /// Player id
    #[serde(default)]
    puuid: String,
    /// Whether this player's team won
    #[serde(default)]
    win: bool,
    /// Champion played
    #[serde(default)]
    champion_name: Option<String>,
    /// Kills
    #[serde(default)]
    kills: u32,
    /// Deaths
    #[serde(default)]
    deaths: u32,
    /// Assists
    #[serde(default)]
    assists: u32,
}

impl LolMatch {
    /// Build a match from parts.
    pub fn new(match_id: impl Into<String>, info: LolMatchInfo) -> Self {
        Self {
            metadata: LolMatchMetadata {
                match_id: match_id.into(),
            },
            info,
        }
    }

    /// True for Ranked Solo/Duo and Ranked Flex.
    pub fn is_ranked(&self) -> bool {
        matches!(
            self.info.queue_id,
            Some(LOL_RANKED_SOLO_QUEUE) | Some(LOL_RANKED_FLEX_QUEUE)
        )
    }

    /// The participant with `puuid`, if they played in this match.
    pub fn participant(&self, puuid: &str) -> Option<&LolParticipant> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

impl LolMatchInfo {
    /// Build match details.
    pub fn new(
        queue_id: Option<u32>,
        game_start_timestamp: Option<i64>,
        participants: Vec<LolParticipant>,
    ) -> Self {
        Self {
            queue_id,
            game_start_timestamp,
            participants,
        }
    }
}

impl LolParticipant {
    /// Build a participant line.
    pub fn new(
        puuid: impl Into<String>,
        win: bool,
        champion_name: Option<String>,
        (kills, deaths, assists): (u32, u32, u32),
    ) -> Self {
        Self {
            puuid: puuid.into(),
            win,
            champion_name,
            kills,
            deaths,
            assists,
        }
    }
}
