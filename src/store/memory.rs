use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use super::{DataStore, SessionId, Value};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// Mapping handle that can be shared between stores on purpose.
pub type SharedMap = Arc<RwLock<HashMap<String, Value>>>;

/// In-memory [`DataStore`].
///
/// Session ids and queries are ignored: every session sees the same keys.
/// Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryDataStore {
    data: SharedMap,
}

impl MemoryDataStore {
    /// Empty store backed by its own freshly allocated mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `initial`. The map is moved in, so no one else
    /// can observe later saves.
    pub fn with_initial(initial: HashMap<String, Value>) -> Self {
        debug!(keys = initial.len(), "seeding memory store");
        Self {
            data: Arc::new(RwLock::new(initial)),
        }
    }

    /// Store backed by a caller-owned mapping. Saves through this store are
    /// visible to every other holder of `data`.
    pub fn with_shared(data: SharedMap) -> Self {
        Self { data }
    }

    /// Store seeded with a fresh copy of the configured `initial` table.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_initial(config.initial.clone())
    }

    /// Handle to the backing mapping, for building stores that share it.
    pub fn shared(&self) -> SharedMap {
        Arc::clone(&self.data)
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    /// True when nothing has been seeded or saved.
    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }

    /// True when `key` would `load` without error.
    pub async fn contains_key(&self, key: &str) -> bool {
        self.data.read().await.contains_key(key)
    }
}

#[async_trait]
impl DataStore for MemoryDataStore {
    async fn load(&self, session_id: &SessionId, key: &str, query: &str) -> Result<Value> {
        trace!(%session_id, key, query, "load");
        let data = self.data.read().await;
        data.get(key)
            .cloned()
            .ok_or_else(|| StoreError::KeyNotFound { key: key.to_string() })
    }

    async fn save(&self, session_id: &SessionId, key: &str, value: Value) -> Result<()> {
        trace!(%session_id, key, "save");
        let mut data = self.data.write().await;
        data.insert(key.to_string(), value);
        Ok(())
    }
}
