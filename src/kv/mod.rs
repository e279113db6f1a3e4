//! Key-Value Store Module
//!
//! The backing store the cache and record endpoints write through. Values
//! are JSON documents; keys are flat strings carrying a namespace prefix.

mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageError;

pub use memory::MemoryKvStore;

/// Convenience Result type for backend operations.
pub type StoreResult<T> = std::result::Result<T, StorageError>;

// == KvStore Trait ==
/// Single-key async storage with prefix scans.
///
/// Each call is independent. Writes replace whatever was stored under the
/// key; deletes succeed whether or not the key existed.
#[async_trait]
pub trait KvStore: Send + Sync + std::fmt::Debug {
    /// Returns the value under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Removes `key`.
    async fn del(&self, key: &str) -> StoreResult<()>;

    /// Removes `key` only if it still holds `expected`, in one atomic step.
    ///
    /// Returns whether the entry was removed. A newer write under the same
    /// key is left in place.
    async fn del_if(&self, key: &str, expected: &Value) -> StoreResult<bool>;

    /// Returns every `(key, value)` pair whose key starts with `prefix`.
    async fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Value)>>;
}
