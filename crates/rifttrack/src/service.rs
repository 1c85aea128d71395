//! Ranked record lookups.

use crate::RiftConfig;
use derive_getters::Getters;
use rifttrack_cache::{CacheAsideFetcher, CacheStore, FetchMetrics, MetricsSink};
use rifttrack_error::RiftResult;
use rifttrack_history::{
    HistoryAggregator, LolMatchSource, LolOutcome, LolRankedStrategy, ScanSettings,
    TftMatchSource, TftOutcome, TftRankedStrategy,
};
use rifttrack_riot::{Account, LeagueEntry, RiotClient, RiotId};
use tracing::{debug, instrument};

/// Which game a lookup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    /// League of Legends
    Lol,
    /// Teamfight Tactics
    Tft,
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Game::Lol => "lol",
            Game::Tft => "tft",
        })
    }
}

/// A player's LoL ranked standing and recent ranked games.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct LolRecord {
    account: Account,
    standing: Option<LeagueEntry>,
    games: Vec<LolOutcome>,
    target_limit: usize,
}

impl LolRecord {
    /// Assemble a record.
    pub fn new(
        account: Account,
        standing: Option<LeagueEntry>,
        games: Vec<LolOutcome>,
        target_limit: usize,
    ) -> Self {
        Self {
            account,
            standing,
            games,
            target_limit,
        }
    }
}

/// A player's TFT ranked standing and recent ranked placements.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct TftRecord {
    account: Account,
    standing: Option<LeagueEntry>,
    games: Vec<TftOutcome>,
    target_limit: usize,
}

impl TftRecord {
    /// Assemble a record.
    pub fn new(
        account: Account,
        standing: Option<LeagueEntry>,
        games: Vec<TftOutcome>,
        target_limit: usize,
    ) -> Self {
        Self {
            account,
            standing,
            games,
            target_limit,
        }
    }
}

/// Resolves Riot IDs and gathers standing plus recent history per game.
///
/// Cheap to clone; clones share the HTTP pool and the cache connection.
#[derive(Debug, Clone)]
pub struct RecordService {
    client: RiotClient,
    lol: HistoryAggregator<LolMatchSource>,
    tft: HistoryAggregator<TftMatchSource>,
    lol_settings: ScanSettings,
    tft_settings: ScanSettings,
}

impl RecordService {
    /// Wire a service from an existing client and cache store.
    pub fn new(client: RiotClient, store: CacheStore, config: &RiftConfig) -> Self {
        let fetcher = CacheAsideFetcher::new(store);
        Self {
            lol: HistoryAggregator::new(LolMatchSource::new(client.clone()), fetcher.clone()),
            tft: HistoryAggregator::new(TftMatchSource::new(client.clone()), fetcher),
            client,
            lol_settings: config.lol().clone(),
            tft_settings: config.tft().clone(),
        }
    }

    /// Build the client from `RIOT_API_KEY` and the cache store from `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is missing or a host URL is invalid.
    pub fn from_config(config: &RiftConfig) -> RiftResult<Self> {
        let client = RiotClient::from_env(config.riot())?;
        let store = CacheStore::from_config(config.cache());
        Ok(Self::new(client, store, config))
    }

    /// The plain-text record report for `riot_id`.
    ///
    /// The scan metrics are logged at debug level on success and on failure alike.
    ///
    /// # Errors
    ///
    /// Whatever [`lol_record`](Self::lol_record) or [`tft_record`](Self::tft_record) returns.
    pub async fn report(
        &self,
        game: Game,
        riot_id: &RiotId,
        metrics: &FetchMetrics,
    ) -> RiftResult<String> {
        let report = match game {
            Game::Lol => self
                .lol_record(riot_id, metrics)
                .await
                .map(|record| record.to_string()),
            Game::Tft => self
                .tft_record(riot_id, metrics)
                .await
                .map(|record| record.to_string()),
        };

        debug!(
            %game,
            succeeded = report.is_ok(),
            metrics = %serde_json::to_string(&metrics.snapshot()).unwrap_or_default(),
            "Scan metrics"
        );
        report
    }

    /// LoL standing and the most recent ranked Solo/Flex games.
    ///
    /// # Errors
    ///
    /// Account lookup failures (including 404), standing failures other than 404,
    /// any match fetch failure, or the scan deadline.
    #[instrument(skip(self, metrics), fields(riot_id = %riot_id))]
    pub async fn lol_record(
        &self,
        riot_id: &RiotId,
        metrics: &dyn MetricsSink,
    ) -> RiftResult<LolRecord> {
        let account = self
            .client
            .account_by_riot_id(riot_id.game_name(), riot_id.tag_line())
            .await?;
        debug!(puuid = %account.puuid(), "Resolved account");

        let standing = self.client.lol_ranked_entry(account.puuid()).await?;
        let games = self
            .lol
            .aggregate_with_deadline(
                account.puuid(),
                &self.lol_settings,
                &LolRankedStrategy,
                metrics,
            )
            .await?;

        Ok(LolRecord::new(
            account,
            standing,
            games,
            *self.lol_settings.target_limit(),
        ))
    }

    /// TFT standing and the most recent ranked placements.
    ///
    /// # Errors
    ///
    /// Same as [`lol_record`](Self::lol_record).
    #[instrument(skip(self, metrics), fields(riot_id = %riot_id))]
    pub async fn tft_record(
        &self,
        riot_id: &RiotId,
        metrics: &dyn MetricsSink,
    ) -> RiftResult<TftRecord> {
        let account = self
            .client
            .account_by_riot_id(riot_id.game_name(), riot_id.tag_line())
            .await?;
        debug!(puuid = %account.puuid(), "Resolved account");

        let standing = self.client.tft_ranked_entry(account.puuid()).await?;
        let games = self
            .tft
            .aggregate_with_deadline(
                account.puuid(),
                &self.tft_settings,
                &TftRankedStrategy,
                metrics,
            )
            .await?;

        Ok(TftRecord::new(
            account,
            standing,
            games,
            *self.tft_settings.target_limit(),
        ))
    }
}
