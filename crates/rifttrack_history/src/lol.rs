//! League of Legends ranked history.

use crate::{OutcomeStrategy, RecordSource};
use async_trait::async_trait;
use derive_getters::Getters;
use rifttrack_error::UpstreamResult;
use rifttrack_riot::{LolMatch, RiotClient, date_from_millis};
use serde::Serialize;
use serde_json::Value;

/// Cache namespace for LoL match records.
pub const LOL_MATCH_NAMESPACE: &str = "lol:match";

/// LoL ranked match ids and match records from the Riot API.
#[derive(Debug, Clone)]
pub struct LolMatchSource {
    client: RiotClient,
}

impl LolMatchSource {
    /// Wrap a client.
    pub fn new(client: RiotClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource for LolMatchSource {
    type Record = LolMatch;

    fn namespace(&self) -> &str {
        LOL_MATCH_NAMESPACE
    }

    async fn list_candidates(&self, actor_id: &str, window_size: usize) -> UpstreamResult<Vec<String>> {
        self.client.lol_match_ids(actor_id, window_size).await
    }

    async fn fetch_payload(&self, record_id: &str) -> UpstreamResult<Value> {
        self.client.lol_match_payload(record_id).await
    }
}

/// One ranked LoL game from the player's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct LolOutcome {
    /// Match id
    match_id: String,
    /// Whether the player's team won
    win: bool,
    /// Champion played, `Unknown` when absent
    champion: String,
    /// Kills
    kills: u32,
    /// Deaths
    deaths: u32,
    /// Assists
    assists: u32,
    /// Start date as `YYYY-MM-DD` (UTC)
    #[builder(default)]
    date: Option<String>,
    /// Queue the game was played in
    #[builder(default)]
    queue_id: Option<u32>,
}

/// Keeps Ranked Solo/Duo and Ranked Flex games.
#[derive(Debug, Clone, Copy, Default)]
pub struct LolRankedStrategy;

impl OutcomeStrategy<LolMatch> for LolRankedStrategy {
    type Outcome = LolOutcome;

    fn qualifies(&self, record: &LolMatch) -> bool {
        record.is_ranked()
    }

    fn extract(&self, record: &LolMatch, actor_id: &str) -> Option<LolOutcome> {
        let me = record.participant(actor_id)?;
        Some(LolOutcome {
            match_id: record.metadata().match_id().clone(),
            win: *me.win(),
            champion: me
                .champion_name()
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            kills: *me.kills(),
            deaths: *me.deaths(),
            assists: *me.assists(),
            date: record
                .info()
                .game_start_timestamp()
                .and_then(date_from_millis),
            queue_id: *record.info().queue_id(),
        })
    }
}
