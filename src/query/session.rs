//! Search session state machine
//!
//! One `SearchSession` per search screen. The session is a cheaply cloneable
//! handle so an in-flight search task and the issuing caller can share it;
//! a generation counter gives last-request-wins semantics when a new search
//! is submitted while an older catalog fetch is still pending.
//!
//! Valid transitions:
//! - Idle      -> Searching  (on: Submit)
//! - Results   -> Searching  (on: Submit)
//! - Searching -> Searching  (on: Submit, supersedes the in-flight search)
//! - Searching -> Results    (on: CatalogLoaded)
//! - Searching -> Idle       (on: CatalogFailed)
//! - Results   -> Idle       (on: Clear)
//! - Idle      -> Idle       (on: Clear)

use crate::catalog::types::Product;
use crate::errors::{Result, SearchError};
use crate::query::filter::SearchFilter;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Search session states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No search in progress, no results held
    #[default]
    Idle,

    /// Catalog fetch in flight
    Searching,

    /// Last search completed with a result list
    Results,
}

/// Events that trigger session state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A non-empty query was submitted
    Submit,

    /// Catalog fetch completed and results were produced
    CatalogLoaded,

    /// Catalog fetch failed; session recovers with empty results
    CatalogFailed,

    /// Caller cleared the search box
    Clear,
}

impl SessionState {
    /// Attempt a state transition, rejecting invalid edges
    pub fn transition(&self, event: SessionEvent) -> Result<SessionState> {
        use SessionEvent::*;
        use SessionState::*;

        let next = match (self, event) {
            (Idle, Submit) => Searching,
            (Results, Submit) => Searching,
            (Searching, Submit) => Searching,

            (Searching, CatalogLoaded) => Results,
            (Searching, CatalogFailed) => Idle,

            (Results, Clear) => Idle,
            (Idle, Clear) => Idle,

            (from, event) => {
                return Err(SearchError::InvalidTransition {
                    from: format!("{:?}", from),
                    event: format!("{:?}", event),
                });
            }
        };

        Ok(next)
    }

    /// True while a catalog fetch is pending
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Searching)
    }
}

/// Cooperative cancellation flag for an in-flight search
///
/// Cancel on screen teardown; results that arrive afterwards are discarded
/// instead of mutating a dead session.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct SessionCore {
    query: String,
    filter: SearchFilter,
    results: Vec<Product>,
    state: SessionState,
}

struct SessionInner {
    id: Uuid,
    generation: AtomicU64,
    core: Mutex<SessionCore>,
}

/// Transient per-screen search session
///
/// Created on screen entry, dropped on exit, never persisted. Holds the
/// current query, the active filter, and the last result list.
#[derive(Clone)]
pub struct SearchSession {
    inner: Arc<SessionInner>,
}

impl SearchSession {
    /// Create a fresh idle session
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id: Uuid::new_v4(),
                generation: AtomicU64::new(0),
                core: Mutex::new(SessionCore::default()),
            }),
        }
    }

    /// Session identifier
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.core().state
    }

    /// Current query string
    pub fn query(&self) -> String {
        self.core().query.clone()
    }

    /// Active filter
    pub fn filter(&self) -> SearchFilter {
        self.core().filter.clone()
    }

    /// Last committed result list
    pub fn results(&self) -> Vec<Product> {
        self.core().results.clone()
    }

    /// Replace the active filter
    pub fn set_filter(&self, filter: SearchFilter) {
        self.core().filter = filter;
    }

    /// Clear the search box: drop query and results, return to idle
    pub fn clear(&self) -> Result<()> {
        let mut core = self.core();
        core.state = core.state.transition(SessionEvent::Clear)?;
        core.query.clear();
        core.results.clear();
        Ok(())
    }

    // Poisoned locks are recovered; the core holds no invariants that a
    // panicking reader could break.
    fn core(&self) -> MutexGuard<'_, SessionCore> {
        self.inner.core.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the held result list without a state transition; used when a
    /// filter is re-applied on top of committed results.
    pub(crate) fn set_results(&self, results: Vec<Product>) {
        self.core().results = results;
    }

    /// Record a submitted query and return the generation stamp that the
    /// resulting fetch must present to commit its outcome.
    pub(crate) fn begin(&self, query: &str) -> Result<u64> {
        let mut core = self.core();
        core.state = core.state.transition(SessionEvent::Submit)?;
        core.query = query.to_string();
        // Bumped under the lock so stamps order consistently with begins
        Ok(self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether the stamp still identifies the most recent search
    pub(crate) fn is_current(&self, stamp: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == stamp
    }

    /// Commit results for the stamped search; returns false (and leaves the
    /// session untouched) when a newer search superseded it.
    pub(crate) fn complete_if_current(&self, stamp: u64, results: Vec<Product>) -> Result<bool> {
        let mut core = self.core();
        if self.inner.generation.load(Ordering::SeqCst) != stamp {
            return Ok(false);
        }
        core.state = core.state.transition(SessionEvent::CatalogLoaded)?;
        core.results = results;
        Ok(true)
    }

    /// Record a failed fetch for the stamped search; recovers to idle with
    /// empty results. Returns false when superseded.
    pub(crate) fn fail_if_current(&self, stamp: u64) -> Result<bool> {
        let mut core = self.core();
        if self.inner.generation.load(Ordering::SeqCst) != stamp {
            return Ok(false);
        }
        core.state = core.state.transition(SessionEvent::CatalogFailed)?;
        core.results.clear();
        Ok(true)
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
