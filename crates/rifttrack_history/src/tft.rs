//! Teamfight Tactics ranked history.

use crate::{OutcomeStrategy, RecordSource};
use async_trait::async_trait;
use derive_getters::Getters;
use rifttrack_error::UpstreamResult;
use rifttrack_riot::{RiotClient, TftMatch, date_from_millis};
use serde::Serialize;
use serde_json::Value;

/// Cache namespace for TFT match records.
pub const TFT_MATCH_NAMESPACE: &str = "tft:match";

/// TFT match ids and match records from the Riot API.
#[derive(Debug, Clone)]
pub struct TftMatchSource {
    client: RiotClient,
}

impl TftMatchSource {
    /// Wrap a client.
    pub fn new(client: RiotClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource for TftMatchSource {
    type Record = TftMatch;

    fn namespace(&self) -> &str {
        TFT_MATCH_NAMESPACE
    }

    async fn list_candidates(&self, actor_id: &str, window_size: usize) -> UpstreamResult<Vec<String>> {
        self.client.tft_match_ids(actor_id, window_size).await
    }

    async fn fetch_payload(&self, record_id: &str) -> UpstreamResult<Value> {
        self.client.tft_match_payload(record_id).await
    }
}

/// One ranked TFT game: where the player finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct TftOutcome {
    /// Match id
    match_id: String,
    /// Final placement, 1 through 8
    placement: u8,
    /// Start date as `YYYY-MM-DD` (UTC)
    #[builder(default)]
    date: Option<String>,
}

/// Keeps ranked TFT games in which the player has a placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct TftRankedStrategy;

impl OutcomeStrategy<TftMatch> for TftRankedStrategy {
    type Outcome = TftOutcome;

    fn qualifies(&self, record: &TftMatch) -> bool {
        record.is_ranked()
    }

    fn extract(&self, record: &TftMatch, actor_id: &str) -> Option<TftOutcome> {
        let placement = (*record.participant(actor_id)?.placement())?;
        Some(TftOutcome {
            match_id: record.metadata().match_id().clone(),
            placement,
            date: record.info().game_datetime().and_then(date_from_millis),
        })
    }
}
