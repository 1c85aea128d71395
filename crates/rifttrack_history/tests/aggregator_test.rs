//! HistoryAggregator ordering, early termination, pacing and deadline behavior.

use async_trait::async_trait;
use parking_lot::Mutex;
use rifttrack_cache::{
    CacheAsideFetcher, CacheBackend, CacheStore, FetchMetrics, MemoryBackend, NoopMetrics,
};
use rifttrack_error::{UpstreamError, UpstreamErrorKind, UpstreamResult};
use rifttrack_history::{FnStrategy, HistoryAggregator, RecordSource, ScanSettings};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const ME: &str = "puuid-me";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Game {
    id: String,
    ranked: bool,
    players: Vec<String>,
}

/// Record source double that records every call.
struct FakeSource {
    candidates: Vec<String>,
    games: HashMap<String, Game>,
    failing: HashMap<String, u16>,
    empty: HashSet<String>,
    list_failure: Option<u16>,
    fetched: Mutex<Vec<String>>,
    listed: Mutex<Vec<usize>>,
}

impl FakeSource {
    fn new(games: Vec<Game>) -> Self {
        Self {
            candidates: games.iter().map(|g| g.id.clone()).collect(),
            games: games.into_iter().map(|g| (g.id.clone(), g)).collect(),
            failing: HashMap::new(),
            empty: HashSet::new(),
            list_failure: None,
            fetched: Mutex::new(Vec::new()),
            listed: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, id: &str, status: u16) -> Self {
        self.failing.insert(id.to_string(), status);
        self
    }

    fn empty_on(mut self, id: &str) -> Self {
        self.candidates.push(id.to_string());
        self.empty.insert(id.to_string());
        self
    }

    fn failing_list(mut self, status: u16) -> Self {
        self.list_failure = Some(status);
        self
    }

    fn fetched(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }
}

fn status_error(status: u16) -> UpstreamError {
    UpstreamError::new(UpstreamErrorKind::Status {
        status,
        message: "boom".to_string(),
        url: "http://riot.test".to_string(),
    })
}

#[async_trait]
impl RecordSource for FakeSource {
    type Record = Game;

    fn namespace(&self) -> &str {
        "test:game"
    }

    async fn list_candidates(&self, _actor_id: &str, window_size: usize) -> UpstreamResult<Vec<String>> {
        self.listed.lock().push(window_size);
        if let Some(status) = self.list_failure {
            return Err(status_error(status));
        }
        Ok(self.candidates.iter().take(window_size).cloned().collect())
    }

    async fn fetch_payload(&self, record_id: &str) -> UpstreamResult<Value> {
        self.fetched.lock().push(record_id.to_string());
        if let Some(status) = self.failing.get(record_id) {
            return Err(status_error(*status));
        }
        if self.empty.contains(record_id) {
            return Ok(Value::Null);
        }
        let game = self.games.get(record_id).ok_or_else(|| status_error(404))?;
        // Upstream sends more than the record type models
        let mut payload = serde_json::to_value(game).unwrap();
        payload["duration"] = json!(1834);
        Ok(payload)
    }
}

fn game(id: &str, ranked: bool) -> Game {
    Game {
        id: id.to_string(),
        ranked,
        players: vec![ME.to_string()],
    }
}

fn ranked_ids() -> FnStrategy<impl Fn(&Game) -> bool, impl Fn(&Game, &str) -> Option<String>> {
    FnStrategy::new(
        |g: &Game| g.ranked,
        |g: &Game, actor: &str| g.players.iter().any(|p| p == actor).then(|| g.id.clone()),
    )
}

fn aggregator(source: FakeSource) -> HistoryAggregator<FakeSource> {
    aggregator_over(source, Arc::new(MemoryBackend::new(100)))
}

fn aggregator_over(source: FakeSource, backend: Arc<MemoryBackend>) -> HistoryAggregator<FakeSource> {
    HistoryAggregator::new(source, CacheAsideFetcher::new(CacheStore::new(backend)))
}

fn settings(limit: usize) -> ScanSettings {
    ScanSettings::default()
        .with_target_limit(limit)
        .with_inter_request_delay_ms(150)
}

#[tokio::test(start_paused = true)]
async fn test_stops_at_limit_without_fetching_the_rest() {
    let agg = aggregator(FakeSource::new(vec![
        game("A", true),
        game("B", false),
        game("C", true),
        game("D", true),
    ]));

    let out = agg
        .aggregate(ME, &settings(2), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();

    assert_eq!(out, vec!["A", "C"]);
    assert_eq!(agg.source().fetched(), vec!["A", "B", "C"]);
}

#[tokio::test(start_paused = true)]
async fn test_empty_candidates_fetch_nothing() {
    let agg = aggregator(FakeSource::new(vec![]));
    let out = agg
        .aggregate(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();
    assert!(out.is_empty());
    assert!(agg.source().fetched().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_no_qualifying_records_fetches_each_once() {
    let agg = aggregator(FakeSource::new(vec![
        game("A", false),
        game("B", false),
        game("C", false),
    ]));
    let out = agg
        .aggregate(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();
    assert!(out.is_empty());
    assert_eq!(agg.source().fetched(), vec!["A", "B", "C"]);
}

#[tokio::test(start_paused = true)]
async fn test_window_size_bounds_candidate_listing() {
    let games: Vec<Game> = (0..50).map(|n| game(&format!("G{n}"), false)).collect();
    let agg = aggregator(FakeSource::new(games));
    agg.aggregate(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();

    assert_eq!(*agg.source().listed.lock(), vec![30]);
    assert_eq!(agg.source().fetched().len(), 30);
}

#[tokio::test(start_paused = true)]
async fn test_records_without_the_actor_are_skipped() {
    let mut stranger = game("B", true);
    stranger.players = vec!["someone-else".to_string()];
    let agg = aggregator(FakeSource::new(vec![game("A", true), stranger, game("C", true)]));

    let out = agg
        .aggregate(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();
    assert_eq!(out, vec!["A", "C"]);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_count_bounded_by_lth_qualifying_index() {
    // Qualifying at indices 1, 4, 6; limit 2 means at most 4 + 1 fetches
    let flags = [false, true, false, false, true, false, true, false];
    let games: Vec<Game> = flags
        .iter()
        .enumerate()
        .map(|(i, ranked)| game(&format!("G{i}"), *ranked))
        .collect();
    let agg = aggregator(FakeSource::new(games));

    let out = agg
        .aggregate(ME, &settings(2), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();
    assert_eq!(out, vec!["G1", "G4"]);
    assert_eq!(agg.source().fetched().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_upstream_fetches_are_paced_and_cache_hits_are_not() {
    let agg = aggregator(FakeSource::new(vec![
        game("A", true),
        game("B", false),
        game("C", true),
        game("D", false),
    ]));
    let metrics = FetchMetrics::new();

    let started = Instant::now();
    agg.aggregate(ME, &settings(10), &ranked_ids(), &metrics)
        .await
        .unwrap();
    let first_pass = started.elapsed();

    // Four upstream fetches, four pauses
    assert!(first_pass >= Duration::from_millis(4 * 150));
    assert_eq!(metrics.pacing_waits(), 4);
    assert_eq!(metrics.pacing_total(), Duration::from_millis(600));

    let started = Instant::now();
    let out = agg
        .aggregate(ME, &settings(10), &ranked_ids(), &metrics)
        .await
        .unwrap();
    assert_eq!(out, vec!["A", "C"]);
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(metrics.pacing_waits(), 4);
    assert_eq!(metrics.cache_hits(), 4);
    assert_eq!(agg.source().fetched().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_no_pause_after_the_record_that_reaches_the_limit() {
    let agg = aggregator(FakeSource::new(vec![game("A", true), game("B", true)]));
    let metrics = FetchMetrics::new();

    agg.aggregate(ME, &settings(2), &ranked_ids(), &metrics)
        .await
        .unwrap();
    assert_eq!(metrics.pacing_waits(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_upstream_failure_aborts_scan() {
    let agg = aggregator(
        FakeSource::new(vec![game("A", true), game("B", true), game("C", true)])
            .failing_on("B", 500),
    );
    let metrics = FetchMetrics::new();

    let err = agg
        .aggregate(ME, &settings(10), &ranked_ids(), &metrics)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(agg.source().fetched(), vec!["A", "B"]);
    assert_eq!(metrics.upstream_failures(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_candidate_listing_failure_propagates() {
    let agg = aggregator(FakeSource::new(vec![game("A", true)]).failing_list(429));
    let err = agg
        .aggregate(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap_err();
    assert!(err.is_rate_limited());
    assert!(agg.source().fetched().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_zero_limit_makes_no_upstream_calls() {
    let agg = aggregator(FakeSource::new(vec![game("A", true)]));
    let out = agg
        .aggregate(ME, &settings(0), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();
    assert!(out.is_empty());
    assert!(agg.source().listed.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_deadline_discards_partial_results() {
    let games: Vec<Game> = (0..10).map(|n| game(&format!("G{n}"), true)).collect();
    let agg = aggregator(FakeSource::new(games));
    // Nine pauses of 150ms cannot fit in one second
    let settings = settings(10).with_deadline_secs(1);

    let err = agg
        .aggregate_with_deadline(ME, &settings, &ranked_ids(), &NoopMetrics)
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    assert!(agg.source().fetched().len() < 10);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_met_returns_outcomes() {
    let agg = aggregator(FakeSource::new(vec![game("A", true), game("B", true)]));
    let settings = settings(10).with_deadline_secs(5);

    let out = agg
        .aggregate_with_deadline(ME, &settings, &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();
    assert_eq!(out, vec!["A", "B"]);
}

#[tokio::test(start_paused = true)]
async fn test_upstream_status_survives_deadline_wrapper() {
    let agg = aggregator(FakeSource::new(vec![game("A", true)]).failing_on("A", 403));
    let err = agg
        .aggregate_with_deadline(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap_err();
    assert_eq!(err.upstream_status(), Some(403));
    assert!(!err.is_timeout());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_scans_share_the_cache() {
    let agg = aggregator(FakeSource::new(vec![game("A", true), game("B", true)]));
    let strategy = ranked_ids();
    let s = settings(10);

    let (first, second) = tokio::join!(
        agg.aggregate(ME, &s, &strategy, &NoopMetrics),
        agg.aggregate("puuid-other", &s, &strategy, &NoopMetrics),
    );
    assert_eq!(first.unwrap(), vec!["A", "B"]);
    assert!(second.unwrap().is_empty());

    // A later scan is served entirely from cache
    let before = agg.source().fetched().len();
    agg.aggregate(ME, &s, &strategy, &NoopMetrics).await.unwrap();
    assert_eq!(agg.source().fetched().len(), before);
}

#[tokio::test(start_paused = true)]
async fn test_cache_holds_the_unmodified_payload() {
    let backend = Arc::new(MemoryBackend::new(100));
    let agg = aggregator_over(FakeSource::new(vec![game("A", true)]), backend.clone());

    agg.aggregate(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();

    let stored = backend.get("test:game:A").await.unwrap().unwrap();
    let stored: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored["duration"], 1834);
    assert_eq!(stored["id"], "A");
}

#[tokio::test(start_paused = true)]
async fn test_empty_records_are_skipped_and_paced() {
    let agg = aggregator(
        FakeSource::new(vec![game("A", true)])
            .empty_on("B")
            .empty_on("C"),
    );
    let metrics = FetchMetrics::new();

    let out = agg
        .aggregate(ME, &settings(10), &ranked_ids(), &metrics)
        .await
        .unwrap();

    assert_eq!(out, vec!["A"]);
    assert_eq!(agg.source().fetched(), vec!["A", "B", "C"]);
    assert_eq!(metrics.pacing_waits(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_empty_records_are_refetched_next_scan() {
    let agg = aggregator(FakeSource::new(vec![]).empty_on("A"));

    agg.aggregate(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();
    agg.aggregate(ME, &settings(10), &ranked_ids(), &NoopMetrics)
        .await
        .unwrap();

    assert_eq!(agg.source().fetched(), vec!["A", "A"]);
}
