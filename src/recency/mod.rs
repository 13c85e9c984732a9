//! Recency tracking: bounded, deduplicated, durable string lists
//!
//! Components:
//! - Store: `RecencyStore` with per-category capacities and write serialization
//! - KV: `DurableKeyValueStore` trait, JSON-file and in-memory backends
//! - Retry: bounded backoff for backend write conflicts

pub mod kv;
pub mod retry;
pub mod store;

pub use kv::{DurableKeyValueStore, JsonFileStore, MemoryStore};
pub use retry::RetryPolicy;
pub use store::{
    RecencyStore, RECENTLY_VIEWED, RECENTLY_VIEWED_CAPACITY, SEARCH_HISTORY,
    SEARCH_HISTORY_CAPACITY,
};
