//! Durable key-value backends for recency data
//!
//! The store only needs atomic get/set of a named string list. Two
//! implementations ship: a JSON file under the data directory (durable
//! across restarts) and an in-memory map for tests and embedding.

use crate::errors::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

/// Atomic get/set of a named string list
///
/// Implementations must be read-your-writes consistent: a `get` issued
/// after a `set` returns observes that `set`.
#[async_trait]
pub trait DurableKeyValueStore: Send + Sync {
    /// Read the list stored under `key`; `None` if never written
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Replace the list stored under `key`
    async fn set(&self, key: &str, values: &[String]) -> Result<()>;
}

/// In-memory backend, nothing survives the process
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DurableKeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, values: &[String]) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

/// JSON-file backend: one file holding a map of key to string list
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write of the file so two sets on different
    // keys cannot drop each other's update
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or create the parent directory for) a store file
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> Result<HashMap<String, Vec<String>>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    fn store_map(&self, map: &HashMap<String, Vec<String>>) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;

        // Write-then-rename so a concurrent reader sees either the old or
        // the new file, never a partial write
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

#[async_trait]
impl DurableKeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.load_map()?.remove(key))
    }

    async fn set(&self, key: &str, values: &[String]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_map()?;
        map.insert(key.to_string(), values.to_vec());
        self.store_map(&map)
    }
}
