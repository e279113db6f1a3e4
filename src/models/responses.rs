//! Response DTOs for the guidance server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Acknowledgement for writes and deletes: `{ "success": true }`, with an
/// optional human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    /// Bare acknowledgement
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Acknowledgement with a message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Payload-carrying response: `{ "success": true, "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads that returned a fresh payload
    pub hits: u64,
    /// Reads of keys that were never written or already deleted
    pub misses: u64,
    /// Reads that found and evicted a stale entry
    pub expired: u64,
    /// Entries removed by the sweep task
    pub swept: u64,
    /// Successful writes
    pub writes: u64,
    /// hits / all reads
    pub hit_rate: f64,
    /// TTL applied to every entry, in milliseconds
    pub ttl_ms: u64,
}

impl StatsResponse {
    pub fn new(stats: CacheStats, ttl_ms: u64) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            swept: stats.swept,
            writes: stats.writes,
            ttl_ms,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Convenience alias for the cache read response
pub type CacheGetResponse = DataResponse<Value>;
