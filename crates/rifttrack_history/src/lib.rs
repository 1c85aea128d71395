//! Match-history aggregation.
//!
//! [`HistoryAggregator`] walks a bounded list of candidate record ids from a
//! [`RecordSource`], pulls each record through the cache-aside fetcher, and keeps the
//! outcomes an [`OutcomeStrategy`] accepts until the target count is reached.
//!
//! Candidates are processed strictly in upstream order, one at a time. Every record that
//! had to come from upstream is followed by a fixed pacing delay; cache hits are not paced.
//! Upstream failures abort the scan and are returned unchanged.

#![warn(missing_docs)]

mod aggregator;
mod lol;
mod settings;
mod source;
mod strategy;
mod tft;

pub use aggregator::HistoryAggregator;
pub use lol::{
    LOL_MATCH_NAMESPACE, LolMatchSource, LolOutcome, LolOutcomeBuilder, LolRankedStrategy,
};
pub use settings::{ScanSettings, ScanSettingsBuilder};
pub use source::RecordSource;
pub use strategy::{FnStrategy, OutcomeStrategy};
pub use tft::{
    TFT_MATCH_NAMESPACE, TftMatchSource, TftOutcome, TftOutcomeBuilder, TftRankedStrategy,
};
