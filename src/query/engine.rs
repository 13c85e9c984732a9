//! Query engine: free-text search over catalog snapshots
//!
//! `match_catalog` is the pure matching predicate; `QueryEngine::search`
//! orchestrates a full search round: session transition, catalog fetch,
//! match, filter/sort, and the search-history commit.

use crate::catalog::source::CatalogSource;
use crate::catalog::types::Product;
use crate::errors::Result;
use crate::query::filter::{filter_and_sort, SearchFilter};
use crate::query::session::{CancelToken, SearchSession};
use crate::recency::store::{RecencyStore, SEARCH_HISTORY};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a `search` invocation
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Search completed; the filtered and sorted result list
    Results(Vec<Product>),

    /// A newer search or a cancellation superseded this one; its results
    /// were discarded and the session was not touched
    Superseded,
}

impl SearchOutcome {
    /// Result list, empty when superseded
    pub fn into_products(self) -> Vec<Product> {
        match self {
            SearchOutcome::Results(products) => products,
            SearchOutcome::Superseded => Vec::new(),
        }
    }
}

/// Case-insensitive substring match over title, category, and description
///
/// The query is trimmed first; an empty trimmed query matches nothing
/// rather than everything, so an empty search box never triggers a full
/// catalog scan. No tokenization and no scoring: relevance order is
/// catalog order.
pub fn match_catalog(catalog: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Search orchestrator for one catalog source and one recency store
///
/// The store and source are injected; the engine owns neither lifecycle.
pub struct QueryEngine<C: CatalogSource> {
    source: C,
    history: Arc<RecencyStore>,
}

impl<C: CatalogSource> QueryEngine<C> {
    /// Create an engine over a catalog source and a recency store
    pub fn new(source: C, history: Arc<RecencyStore>) -> Self {
        Self { source, history }
    }

    /// Run a full search round for a session
    ///
    /// - Empty (trimmed) queries are a no-op returning empty results.
    /// - A catalog fetch failure recovers locally: the session returns to
    ///   idle with empty results, the error is logged, never propagated.
    /// - Last-request-wins: if a newer `search` was issued while this fetch
    ///   was in flight, or `cancel` fired, the stale outcome is discarded.
    /// - On success the trimmed query is committed to search history once
    ///   per invocation; a store failure is logged and swallowed so it can
    ///   never block the result list.
    pub async fn search(
        &self,
        session: &SearchSession,
        query: &str,
        cancel: &CancelToken,
    ) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::Results(Vec::new()));
        }

        let stamp = session.begin(query)?;

        let catalog = match self.source.get_products().await {
            Ok(products) => products,
            Err(err) => {
                warn!(session = %session.id(), error = %err, "catalog fetch failed");
                return if !cancel.is_cancelled() && session.fail_if_current(stamp)? {
                    Ok(SearchOutcome::Results(Vec::new()))
                } else {
                    Ok(SearchOutcome::Superseded)
                };
            }
        };

        if cancel.is_cancelled() {
            debug!(session = %session.id(), "search cancelled, discarding results");
            return Ok(SearchOutcome::Superseded);
        }

        let matched = match_catalog(&catalog, query);
        let results = filter_and_sort(&matched, &session.filter());

        if !session.complete_if_current(stamp, results.clone())? {
            debug!(session = %session.id(), "search superseded, discarding results");
            return Ok(SearchOutcome::Superseded);
        }

        if let Err(err) = self.history.add(SEARCH_HISTORY, query).await {
            warn!(error = %err, "failed to persist search term");
        }

        Ok(SearchOutcome::Results(results))
    }

    /// Swap the session filter and re-filter the last result list
    ///
    /// Mirrors a filter sheet applied on top of existing results: no new
    /// catalog fetch, just `filter_and_sort` over what the session holds.
    pub fn apply_filter(&self, session: &SearchSession, filter: SearchFilter) -> Vec<Product> {
        session.set_filter(filter);
        let refiltered = filter_and_sort(&session.results(), &session.filter());
        session.set_results(refiltered.clone());
        refiltered
    }

    /// Recency store this engine commits search terms to
    pub fn history(&self) -> &Arc<RecencyStore> {
        &self.history
    }
}
