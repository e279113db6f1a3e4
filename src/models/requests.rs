//! Request DTOs for the guidance server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for `POST /cache/:field`
#[derive(Debug, Clone, Deserialize)]
pub struct CachePutRequest {
    /// The payload to cache
    pub data: Value,
}

/// Request body for `POST /cache-market-data`
///
/// Carries the field in the body instead of the path.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataRequest {
    /// Market field, e.g. "technology"
    pub field: String,
    /// The payload to cache
    pub data: Value,
}

/// Request body for `POST /student-analysis`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnalysisRequest {
    pub student_id: String,
    pub analysis_data: Value,
}

/// Request body for `POST /user-preferences`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferencesRequest {
    pub user_id: String,
    /// Must be a JSON object
    pub preferences: Value,
}
