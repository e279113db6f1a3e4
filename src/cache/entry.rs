//! Cache Entry Module
//!
//! The envelope stored for every cached payload: the data itself, the
//! write time, and the TTL it was written with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;

// == Cache Entry ==
/// A cached payload with its freshness metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored payload
    pub data: Value,
    /// Write timestamp (Unix milliseconds)
    pub timestamp: u64,
    /// Time-to-live in milliseconds
    pub ttl: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry written at `stored_at` with `ttl_ms`.
    pub fn new(data: Value, stored_at: u64, ttl_ms: u64) -> Self {
        Self {
            data,
            timestamp: stored_at,
            ttl: ttl_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the write. A clock that moved backwards
    /// reports zero.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }

    // == Is Fresh ==
    /// An entry is fresh while `now - timestamp <= ttl`. The boundary is
    /// inclusive: at exactly `timestamp + ttl` the entry is still served.
    pub fn is_fresh(&self, now: u64) -> bool {
        self.age_ms(now) <= self.ttl
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds, zero once stale.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        self.timestamp
            .saturating_add(self.ttl)
            .saturating_sub(now)
    }

    // == Encoding ==
    /// Encodes the envelope for the backing store.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "data": self.data,
            "timestamp": self.timestamp,
            "ttl": self.ttl,
        })
    }

    /// Decodes an envelope read back from `key`.
    pub fn from_value(key: &str, value: Value) -> Result<Self, StorageError> {
        serde_json::from_value(value).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
