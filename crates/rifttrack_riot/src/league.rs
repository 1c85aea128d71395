//! Ranked league entries and standing selection.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Ranked queues a league entry can belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
pub enum QueueType {
    /// Summoner's Rift Solo/Duo
    #[strum(serialize = "RANKED_SOLO_5x5")]
    RankedSolo,
    /// Summoner's Rift Flex
    #[strum(serialize = "RANKED_FLEX_SR")]
    RankedFlex,
    /// TFT ranked
    #[strum(serialize = "RANKED_TFT")]
    RankedTft,
    /// TFT Double Up
    #[strum(serialize = "RANKED_TFT_DOUBLE_UP")]
    RankedTftDoubleUp,
    /// TFT Hyper Roll
    #[strum(serialize = "RANKED_TFT_TURBO")]
    RankedTftTurbo,
}

/// One ranked queue standing (`/lol/league/v4/entries/by-puuid`, `/tft/league/v1/by-puuid`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    /// Raw queue type string
    #[serde(default)]
    queue_type: String,
    /// Tier, e.g. `GOLD`
    #[serde(default)]
    tier: Option<String>,
    /// Division within the tier, e.g. `II`
    #[serde(default)]
    rank: Option<String>,
    /// League points
    #[serde(default)]
    league_points: Option<u32>,
    /// Wins this season
    #[serde(default)]
    wins: u32,
    /// Losses this season
    #[serde(default)]
    losses: u32,
}

impl LeagueEntry {
    /// Build an entry.
    pub fn new(
        queue_type: impl Into<String>,
        tier: Option<String>,
        rank: Option<String>,
        league_points: Option<u32>,
    ) -> Self {
        Self {
            queue_type: queue_type.into(),
            tier,
            rank,
            league_points,
            wins: 0,
            losses: 0,
        }
    }

    /// Parsed queue, `None` for queue types rifttrack does not know.
    pub fn queue(&self) -> Option<QueueType> {
        self.queue_type.parse().ok()
    }
}

/// TFT league responses are either an array of entries or a single entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TftLeagueResponse {
    Many(Vec<LeagueEntry>),
    One(LeagueEntry),
}

impl TftLeagueResponse {
    pub(crate) fn into_entries(self) -> Vec<LeagueEntry> {
        match self {
            TftLeagueResponse::Many(entries) => entries,
            TftLeagueResponse::One(entry) => vec![entry],
        }
    }
}

fn take_queue(entries: &mut Vec<LeagueEntry>, queue: QueueType) -> Option<LeagueEntry> {
    let pos = entries.iter().position(|e| e.queue() == Some(queue))?;
    Some(entries.swap_remove(pos))
}

/// Choose the LoL standing to show: Solo/Duo, then Flex, then whatever came first.
pub fn pick_lol_entry(mut entries: Vec<LeagueEntry>) -> Option<LeagueEntry> {
    if let Some(entry) = take_queue(&mut entries, QueueType::RankedSolo) {
        return Some(entry);
    }
    if let Some(entry) = take_queue(&mut entries, QueueType::RankedFlex) {
        return Some(entry);
    }
    entries.into_iter().next()
}

/// Choose the TFT standing to show: ranked TFT, then whatever came first.
pub fn pick_tft_entry(mut entries: Vec<LeagueEntry>) -> Option<LeagueEntry> {
    if let Some(entry) = take_queue(&mut entries, QueueType::RankedTft) {
        return Some(entry);
    }
    entries.into_iter().next()
}
