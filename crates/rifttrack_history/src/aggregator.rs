//! Sequential, paced, early-terminating history scan.

use crate::{OutcomeStrategy, RecordSource, ScanSettings};
use rifttrack_cache::{CacheAsideFetcher, MetricsSink};
use rifttrack_error::{RiftResult, TimeoutError, UpstreamResult};
use rifttrack_riot::decode_record;
use tracing::{debug, info, instrument, trace};

/// Collects qualifying outcomes from a [`RecordSource`] through the cache.
///
/// Holds no per-scan state; one aggregator can serve any number of concurrent scans,
/// which share only the cache store behind the fetcher.
#[derive(Debug, Clone)]
pub struct HistoryAggregator<S> {
    source: S,
    fetcher: CacheAsideFetcher,
}

impl<S: RecordSource> HistoryAggregator<S> {
    /// Create an aggregator over `source`, caching through `fetcher`.
    pub fn new(source: S, fetcher: CacheAsideFetcher) -> Self {
        Self { source, fetcher }
    }

    /// The record source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Scan `actor_id`'s most recent records and return up to `target_limit` outcomes,
    /// newest first.
    ///
    /// Stops as soon as the limit is reached; later candidates are never fetched. After
    /// each record that came from upstream, qualifying or not, the scan sleeps for the
    /// pacing delay unless that record completed the limit. Empty records are skipped.
    ///
    /// # Errors
    ///
    /// The first upstream failure, from the candidate listing or any record fetch, or a
    /// `Decode` failure when a record payload does not fit the source's record type.
    #[instrument(
        skip(self, settings, strategy, metrics),
        fields(namespace = %self.source.namespace())
    )]
    pub async fn aggregate<St>(
        &self,
        actor_id: &str,
        settings: &ScanSettings,
        strategy: &St,
        metrics: &dyn MetricsSink,
    ) -> UpstreamResult<Vec<St::Outcome>>
    where
        St: OutcomeStrategy<S::Record>,
    {
        let limit = *settings.target_limit();
        if limit == 0 {
            debug!("Target limit is zero, nothing to collect");
            return Ok(Vec::new());
        }

        let candidates = self
            .source
            .list_candidates(actor_id, *settings.window_size())
            .await?;
        if candidates.is_empty() {
            debug!("No candidate records");
            return Ok(Vec::new());
        }

        let namespace = self.source.namespace();
        let ttl = settings.cache_ttl();
        let delay = settings.inter_request_delay();
        let mut outcomes = Vec::with_capacity(limit.min(candidates.len()));
        let mut scanned = 0usize;
        let mut cached = 0usize;

        for record_id in &candidates {
            let fetched = self
                .fetcher
                .fetch_with_cache(namespace, record_id, ttl, metrics, || {
                    self.source.fetch_payload(record_id)
                })
                .await?;
            scanned += 1;

            let from_cache = fetched.served_from_cache();
            if from_cache {
                cached += 1;
            }
            let record: Option<S::Record> = decode_record(record_id, fetched.into_value())?;

            match record {
                None => debug!(record_id = %record_id, "Empty record, skipping"),
                Some(record) if !strategy.qualifies(&record) => {
                    trace!(record_id = %record_id, "Record does not qualify");
                }
                Some(record) => match strategy.extract(&record, actor_id) {
                    Some(outcome) => {
                        outcomes.push(outcome);
                        if outcomes.len() >= limit {
                            break;
                        }
                    }
                    None => trace!(record_id = %record_id, "Actor not found in record"),
                },
            }

            if !from_cache && !delay.is_zero() {
                metrics.record_pacing(delay);
                tokio::time::sleep(delay).await;
            }
        }

        info!(
            candidates = candidates.len(),
            scanned,
            cached,
            collected = outcomes.len(),
            "History scan complete"
        );
        Ok(outcomes)
    }

    /// [`aggregate`](Self::aggregate) under the settings' deadline, if any.
    ///
    /// When the deadline expires the scan is dropped at its next suspension point and any
    /// outcomes collected so far are discarded.
    ///
    /// # Errors
    ///
    /// A timeout error on expiry, otherwise whatever [`aggregate`](Self::aggregate) returns.
    pub async fn aggregate_with_deadline<St>(
        &self,
        actor_id: &str,
        settings: &ScanSettings,
        strategy: &St,
        metrics: &dyn MetricsSink,
    ) -> RiftResult<Vec<St::Outcome>>
    where
        St: OutcomeStrategy<S::Record>,
    {
        let scan = self.aggregate(actor_id, settings, strategy, metrics);
        let Some(budget) = settings.deadline() else {
            return Ok(scan.await?);
        };

        match tokio::time::timeout(budget, scan).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                info!(namespace = %self.source.namespace(), ?budget, "History scan timed out");
                Err(TimeoutError::new(
                    format!("{} history scan", self.source.namespace()),
                    budget,
                )
                .into())
            }
        }
    }
}
