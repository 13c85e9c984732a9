//! shopsearch - storefront catalog search core
//!
//! Search, filter, sort, and recency tracking over a product catalog.
//!
//! # Architecture
//!
//! - **catalog**: product model and snapshot sources (HTTP, static)
//! - **query**: matching, filter/sort pipeline, per-screen session lifecycle
//! - **recency**: bounded, deduplicated, durable most-recent-first lists

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod query;
pub mod recency;

// Re-export commonly used types
pub use catalog::{CatalogSource, HttpCatalogSource, Product, Rating, StaticCatalogSource};
pub use config::Config;
pub use errors::{Result, SearchError};
pub use query::{
    by_category, filter_and_sort, match_catalog, CancelToken, QueryEngine, SearchFilter,
    SearchOutcome, SearchSession, SessionState, SortOption,
};
pub use recency::{
    DurableKeyValueStore, JsonFileStore, MemoryStore, RecencyStore, RECENTLY_VIEWED,
    SEARCH_HISTORY,
};
