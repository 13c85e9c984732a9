//! Query pipeline: matching, filtering, sorting, session lifecycle
//!
//! Components:
//! - Filter: composable `SearchFilter` with pure `filter_and_sort` / `by_category`
//! - Engine: `QueryEngine` orchestrating fetch, match, sort, history commit
//! - Session: per-screen state machine with last-request-wins semantics

pub mod engine;
pub mod filter;
pub mod session;

pub use engine::{match_catalog, QueryEngine, SearchOutcome};
pub use filter::{by_category, filter_and_sort, SearchFilter, SortOption};
pub use session::{CancelToken, SearchSession, SessionEvent, SessionState};
