//! Key Namespaces
//!
//! Every key in the backing store is a namespace prefix followed by an
//! identifier supplied by the client (a market field, a student id, a user id).

use crate::error::{Result, ServiceError};

/// Maximum allowed composite key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

// == Namespace ==
/// The key families the server writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Cached market-trend blobs, subject to TTL
    MarketTrends,
    /// Stored student analyses
    StudentAnalysis,
    /// Saved user preferences
    UserPreferences,
}

impl Namespace {
    /// Key prefix for this namespace.
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::MarketTrends => "market_trends_",
            Namespace::StudentAnalysis => "student_analysis_",
            Namespace::UserPreferences => "user_preferences_",
        }
    }

    /// Builds the composite key for `id`.
    ///
    /// Rejects empty ids and keys longer than [`MAX_KEY_LENGTH`].
    pub fn key(self, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "Identifier cannot be empty".to_string(),
            ));
        }

        let key = format!("{}{}", self.prefix(), id);
        if key.len() > MAX_KEY_LENGTH {
            return Err(ServiceError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        Ok(key)
    }
}
