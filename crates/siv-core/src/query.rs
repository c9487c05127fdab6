//! Query facade consumed by the presentation layer.
//!
//! [`query`] filters a store and summarizes the filtered rows; [`overview`]
//! summarizes the whole snapshot. The two are independent calls over
//! different base sets and are never merged.

use crate::aggregate::Summarize;
use crate::filter::{filter, RecordQuery};
use crate::store::RecordStore;
use serde::Serialize;
use tracing::{debug, instrument};

/// Filtered records plus statistics over exactly those records.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<R, S> {
    /// Matching records in store order. Empty when nothing matches.
    pub filtered: Vec<R>,
    /// Statistics over `filtered`.
    pub stats: S,
}

impl<R, S> QueryResult<R, S> {
    /// Whether no record matched.
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.filtered.len()
    }
}

/// Filters the store's snapshot and summarizes the matches.
#[instrument(skip_all, fields(search = %params.search_term, facets = params.facets.len()))]
pub fn query<R, S>(store: &S, params: &RecordQuery<R::Facet>) -> QueryResult<R, R::Stats>
where
    R: Summarize,
    S: RecordStore<R> + ?Sized,
{
    let snapshot = store.all();
    let filtered = filter(&snapshot, params);
    let stats = R::summarize(&filtered);
    debug!(
        scanned = snapshot.len(),
        matched = filtered.len(),
        "query evaluated"
    );
    QueryResult { filtered, stats }
}

/// Summarizes every record in the store, ignoring any active filter.
#[instrument(skip_all)]
pub fn overview<R, S>(store: &S) -> R::Stats
where
    R: Summarize,
    S: RecordStore<R> + ?Sized,
{
    let snapshot = store.all();
    debug!(records = snapshot.len(), "overview computed");
    R::summarize(&snapshot)
}
