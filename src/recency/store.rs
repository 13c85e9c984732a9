//! Bounded, deduplicated recency lists
//!
//! Each category is an ordered string set, most-recent-first, capped at a
//! fixed capacity. Re-adding a value moves it to the front instead of
//! duplicating it. Writes are read-modify-write against the durable
//! backend, serialized per category so concurrent adds never drop each
//! other.

use crate::errors::{Result, SearchError};
use crate::recency::kv::DurableKeyValueStore;
use crate::recency::retry::RetryPolicy;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Category key for recently viewed product ids
pub const RECENTLY_VIEWED: &str = "recently_viewed";

/// Category key for committed search terms
pub const SEARCH_HISTORY: &str = "search_history";

/// Capacity of the recently-viewed list
pub const RECENTLY_VIEWED_CAPACITY: usize = 20;

/// Capacity of the search-history list
pub const SEARCH_HISTORY_CAPACITY: usize = 10;

struct Category {
    capacity: usize,
    // Per-category write serialization; get_all reads without it
    lock: Arc<Mutex<()>>,
}

/// Durable recency store over an injected key-value backend
///
/// An explicit instance owned by the composing application, not a global
/// singleton. `recently_viewed` and `search_history` are registered out of
/// the box; `with_category` adds more.
pub struct RecencyStore {
    backend: Box<dyn DurableKeyValueStore>,
    categories: HashMap<String, Category>,
    retry: RetryPolicy,
}

impl RecencyStore {
    /// Create a store with the two built-in categories
    pub fn new(backend: Box<dyn DurableKeyValueStore>) -> Self {
        Self {
            backend,
            categories: HashMap::new(),
            retry: RetryPolicy::new(),
        }
        .with_category(RECENTLY_VIEWED, RECENTLY_VIEWED_CAPACITY)
        .with_category(SEARCH_HISTORY, SEARCH_HISTORY_CAPACITY)
    }

    /// Register an additional category with its own capacity
    pub fn with_category(mut self, name: &str, capacity: usize) -> Self {
        self.categories.insert(
            name.to_string(),
            Category {
                capacity,
                lock: Arc::new(Mutex::new(())),
            },
        );
        self
    }

    /// Insert `value` at the front of a category
    ///
    /// An already-present value is moved to the front (touch semantics);
    /// the list is then truncated to the category capacity, dropping the
    /// oldest entries. Conflicting backend writes are retried internally.
    pub async fn add(&self, category: &str, value: &str) -> Result<()> {
        let cat = self.category(category)?;
        let lock = cat.lock.clone();
        let capacity = cat.capacity;

        let _guard = lock.lock().await;
        self.retry
            .execute(|| {
                let backend = self.backend.as_ref();
                async move {
                    let mut entries = backend.get(category).await?.unwrap_or_default();
                    entries.retain(|existing| existing != value);
                    entries.insert(0, value.to_string());
                    entries.truncate(capacity);
                    backend.set(category, &entries).await
                }
            })
            .await
    }

    /// Current list for a category, most-recent-first
    ///
    /// Empty if the category was never populated. Reads a backend snapshot,
    /// so it observes either the pre- or post-state of a concurrent `add`,
    /// never a partial write.
    pub async fn get_all(&self, category: &str) -> Result<Vec<String>> {
        self.category(category)?;
        Ok(self.backend.get(category).await?.unwrap_or_default())
    }

    /// Registered capacity of a category
    pub fn capacity(&self, category: &str) -> Result<usize> {
        Ok(self.category(category)?.capacity)
    }

    fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .get(name)
            .ok_or_else(|| SearchError::UnknownCategory {
                category: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recency::kv::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn store() -> RecencyStore {
        RecencyStore::new(Box::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_empty_category_returns_empty_list() {
        let store = store();
        assert!(store.get_all(SEARCH_HISTORY).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_an_error() {
        let store = store();
        assert!(matches!(
            store.add("favorites", "1").await,
            Err(SearchError::UnknownCategory { .. })
        ));
        assert!(store.get_all("favorites").await.is_err());
    }

    #[tokio::test]
    async fn test_most_recent_first_ordering() {
        let store = store();
        store.add(SEARCH_HISTORY, "shoes").await.unwrap();
        store.add(SEARCH_HISTORY, "bag").await.unwrap();
        store.add(SEARCH_HISTORY, "watch").await.unwrap();

        assert_eq!(
            store.get_all(SEARCH_HISTORY).await.unwrap(),
            vec!["watch", "bag", "shoes"]
        );
    }

    #[tokio::test]
    async fn test_readd_moves_to_front_without_duplicate() {
        let store = store();
        store.add(SEARCH_HISTORY, "shoes").await.unwrap();
        store.add(SEARCH_HISTORY, "bag").await.unwrap();
        store.add(SEARCH_HISTORY, "shoes").await.unwrap();

        assert_eq!(
            store.get_all(SEARCH_HISTORY).await.unwrap(),
            vec!["shoes", "bag"]
        );
    }

    #[tokio::test]
    async fn test_immediate_repeat_add_is_idempotent() {
        let store = store();
        store.add(SEARCH_HISTORY, "shoes").await.unwrap();
        store.add(SEARCH_HISTORY, "shoes").await.unwrap();

        assert_eq!(store.get_all(SEARCH_HISTORY).await.unwrap(), vec!["shoes"]);
    }

    #[tokio::test]
    async fn test_capacity_law() {
        let store = store();
        let capacity = SEARCH_HISTORY_CAPACITY;

        for i in 0..capacity + 5 {
            store
                .add(SEARCH_HISTORY, &format!("term-{}", i))
                .await
                .unwrap();
        }

        let entries = store.get_all(SEARCH_HISTORY).await.unwrap();
        assert_eq!(entries.len(), capacity);

        // The five most recent are present, the five oldest are gone
        for i in capacity..capacity + 5 {
            assert!(entries.contains(&format!("term-{}", i)));
        }
        for i in 0..5 {
            assert!(!entries.contains(&format!("term-{}", i)));
        }
    }

    #[tokio::test]
    async fn test_categories_are_independent() {
        let store = store();
        store.add(SEARCH_HISTORY, "shoes").await.unwrap();
        store.add(RECENTLY_VIEWED, "42").await.unwrap();

        assert_eq!(store.get_all(SEARCH_HISTORY).await.unwrap(), vec!["shoes"]);
        assert_eq!(store.get_all(RECENTLY_VIEWED).await.unwrap(), vec!["42"]);
    }

    #[tokio::test]
    async fn test_concurrent_adds_both_survive() {
        let store = Arc::new(store());

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.add(SEARCH_HISTORY, "alpha").await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.add(SEARCH_HISTORY, "beta").await })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let entries = store.get_all(SEARCH_HISTORY).await.unwrap();
        assert!(entries.contains(&"alpha".to_string()));
        assert!(entries.contains(&"beta".to_string()));
    }

    /// Backend whose first `conflicts` sets fail with a write conflict
    struct ConflictingStore {
        inner: MemoryStore,
        remaining: AtomicU32,
    }

    impl ConflictingStore {
        fn new(conflicts: u32) -> Self {
            Self {
                inner: MemoryStore::new(),
                remaining: AtomicU32::new(conflicts),
            }
        }
    }

    #[async_trait]
    impl DurableKeyValueStore for ConflictingStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, values: &[String]) -> Result<()> {
            if self.remaining.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                n.checked_sub(1)
            }).is_ok()
            {
                return Err(SearchError::StoreWriteConflict {
                    category: key.to_string(),
                });
            }
            self.inner.set(key, values).await
        }
    }

    #[tokio::test]
    async fn test_write_conflicts_are_retried_internally() {
        let store = RecencyStore::new(Box::new(ConflictingStore::new(2)));

        store.add(SEARCH_HISTORY, "shoes").await.unwrap();
        assert_eq!(store.get_all(SEARCH_HISTORY).await.unwrap(), vec!["shoes"]);
    }
}
