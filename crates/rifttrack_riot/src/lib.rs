//! Riot Games API client.
//!
//! [`RiotClient`] performs single authenticated GET requests against the regional
//! (account, match) and platform (league) hosts. Non-2xx responses become
//! [`UpstreamError`](rifttrack_error::UpstreamError)s carrying the HTTP status and the
//! message Riot put in the body. There is no retry: a 429 or 5xx is returned to the caller.
//!
//! Match records are available raw ([`RiotClient::lol_match_payload`]) for callers that
//! cache them, and as typed DTOs decoded from that payload with [`decode_record`]. The DTOs
//! model only the fields rifttrack reads and keep Riot's wire field names.

#![warn(missing_docs)]

mod account;
mod client;
mod config;
mod league;
mod lol;
mod tft;

pub use account::{Account, RiotId};
pub use client::{RiotClient, decode_record};
pub use config::{RiotConfig, RiotConfigBuilder};
pub use league::{LeagueEntry, QueueType, pick_lol_entry, pick_tft_entry};
pub use lol::{
    LOL_RANKED_FLEX_QUEUE, LOL_RANKED_SOLO_QUEUE, LolMatch, LolMatchInfo, LolMatchMetadata,
    LolParticipant,
};
pub use tft::{TFT_RANKED_QUEUE, TftMatch, TftMatchInfo, TftMatchMetadata, TftParticipant};

/// Format a millisecond epoch timestamp as `YYYY-MM-DD` (UTC).
///
/// Returns `None` for zero or out-of-range values.
///
/// ```
/// assert_eq!(
///     rifttrack_riot::date_from_millis(1_704_067_200_000).as_deref(),
///     Some("2024-01-01")
/// );
/// assert_eq!(rifttrack_riot::date_from_millis(0), None);
/// ```
pub fn date_from_millis(millis: i64) -> Option<String> {
    if millis <= 0 {
        return None;
    }
    chrono::DateTime::from_timestamp_millis(millis).map(|dt| dt.format("%Y-%m-%d").to_string())
}
