//! Teamfight Tactics match DTOs.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Ranked TFT queue id.
pub const TFT_RANKED_QUEUE: u32 = 1100;

/// A TFT match (`/tft/match/v1/matches/{id}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct TftMatch {
    /// Match metadata
    #[serde(default)]
    metadata: TftMatchMetadata,
    /// Match details
    #[serde(default)]
    info: TftMatchInfo,
}

/// Match metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct TftMatchMetadata {
    /// Match id, e.g. `KR_7001234567`
    #[serde(default)]
    match_id: String,
}

/// Match details. TFT uses snake_case on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct TftMatchInfo {
    /// Queue the match was played in
    #[serde(default)]
    queue_id: Option<u32>,
    /// Game start in epoch milliseconds
    #[serde(default)]
    game_datetime: Option<i64>,
    /// Eight participants
    #[serde(default)]
    participants: Vec<TftParticipant>,
}

/// One player's result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct TftParticipant {
    /// Player id
    #[serde(default)]
    puuid: String,
    /// Final placement, 1 through 8
    #[serde(default)]
    placement: Option<u8>,
}

impl TftMatch {
    /// Build a match from parts.
    pub fn new(match_id: impl Into<String>, info: TftMatchInfo) -> Self {
        Self {
            metadata: TftMatchMetadata {
                match_id: match_id.into(),
            },
            info,
        }
    }

    /// True for ranked TFT.
    pub fn is_ranked(&self) -> bool {
        self.info.queue_id == Some(TFT_RANKED_QUEUE)
    }

    /// The participant with `puuid`, if they played in this match.
    pub fn participant(&self, puuid: &str) -> Option<&TftParticipant> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

impl TftMatchInfo {
    /// Build match details.
    pub fn new(
        queue_id: Option<u32>,
        game_datetime: Option<i64>,
        participants: Vec<TftParticipant>,
    ) -> Self {
        Self {
            queue_id,
            game_datetime,
            participants,
        }
    }
}

impl TftParticipant {
    /// Build a participant.
    pub fn new(puuid: impl Into<String>, placement: Option<u8>) -> Self {
        Self {
            puuid: puuid.into(),
            placement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_riot_payload() {
        let m: TftMatch = serde_json::from_str(
            r#"{
                "metadata": {"match_id": "KR_55"},
                "info": {
                    "queue_id": 1100,
                    "game_datetime": 1704067200000,
                    "participants": [{"puuid": "p1", "placement": 3, "level": 8}]
                }
            }"#,
        )
        .unwrap();
        assert!(m.is_ranked());
        assert_eq!(m.metadata().match_id(), "KR_55");
        assert_eq!(*m.participant("p1").unwrap().placement(), Some(3));
    }

    #[test]
    fn test_hyper_roll_is_not_ranked() {
        let m = TftMatch::new("KR_1", TftMatchInfo::new(Some(1130), None, vec![]));
        assert!(!m.is_ranked());
        let none = TftMatch::new("KR_2", TftMatchInfo::default());
        assert!(!none.is_ranked());
    }
}
