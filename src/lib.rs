//! Keyed asynchronous storage.
//!
//! [`DataStore`] is the contract every backend implements; [`MemoryDataStore`]
//! is the in-memory backend.
//!
//! ```
//! use keyed_store::{DataStore, MemoryDataStore, SessionId, Value};
//!
//! # #[tokio::main]
//! # async fn main() -> keyed_store::Result<()> {
//! let store = MemoryDataStore::new();
//! let session = SessionId::from("s1");
//! store.save(&session, "answer", Value::from(42i64)).await?;
//! assert_eq!(store.load(&session, "answer", "").await?, Value::Integer(42));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{DataStore, MemoryDataStore, SessionId, SharedMap, Value};
