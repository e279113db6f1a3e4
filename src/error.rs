//! Error types for the guidance server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Storage Error ==
/// Failure reported by a key-value backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored value could not be decoded
    #[error("corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

// == Service Error Enum ==
/// Unified error type for the guidance server.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Key absent, or present but past its TTL
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backing store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServiceError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::Storage(err) => {
                tracing::error!("storage fault: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the guidance server.
pub type Result<T> = std::result::Result<T, ServiceError>;
