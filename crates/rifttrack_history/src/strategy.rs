//! Qualification and outcome extraction.

/// Decides which records count and what to keep from them.
pub trait OutcomeStrategy<R>: Send + Sync {
    /// Normalized projection of a qualifying record.
    type Outcome;

    /// Whether `record` is the kind of record being collected (e.g. a ranked queue).
    fn qualifies(&self, record: &R) -> bool;

    /// Project `record` for `actor_id`; `None` when the actor is not in it.
    fn extract(&self, record: &R, actor_id: &str) -> Option<Self::Outcome>;
}

/// Strategy built from a pair of closures.
///
/// # Example
///
/// ```
/// use rifttrack_history::{FnStrategy, OutcomeStrategy};
///
/// let even = FnStrategy::new(
///     |n: &u32| n % 2 == 0,
///     |n: &u32, _actor: &str| Some(n * 10),
/// );
/// assert!(even.qualifies(&4));
/// assert_eq!(even.extract(&4, "me"), Some(40));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnStrategy<Q, E> {
    qualify: Q,
    extract: E,
}

impl<Q, E> FnStrategy<Q, E> {
    /// Pair a predicate with an extractor.
    pub fn new(qualify: Q, extract: E) -> Self {
        Self { qualify, extract }
    }
}

impl<R, O, Q, E> OutcomeStrategy<R> for FnStrategy<Q, E>
where
    Q: Fn(&R) -> bool + Send + Sync,
    E: Fn(&R, &str) -> Option<O> + Send + Sync,
{
    type Outcome = O;

    fn qualifies(&self, record: &R) -> bool {
        (self.qualify)(record)
    }

    fn extract(&self, record: &R, actor_id: &str) -> Option<O> {
        (self.extract)(record, actor_id)
    }
}
