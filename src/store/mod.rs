//! The asynchronous storage contract and its in-memory backend.

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

pub mod memory;
pub mod value;

pub use memory::{MemoryDataStore, SharedMap};
pub use value::Value;

/// Opaque token scoping reads and writes to a tenant or conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keyed storage shared by every backend.
///
/// `session_id` and `query` are part of the contract so callers can swap
/// backends freely. Backends that do not partition by session or filter
/// reads accept and ignore them.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Returns the value stored under `key`, or
    /// [`StoreError::KeyNotFound`](crate::error::StoreError::KeyNotFound).
    async fn load(&self, session_id: &SessionId, key: &str, query: &str) -> Result<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn save(&self, session_id: &SessionId, key: &str, value: Value) -> Result<()>;
}
