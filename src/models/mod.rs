//! Request and Response models for the guidance server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    CachePutRequest, MarketDataRequest, StudentAnalysisRequest, UserPreferencesRequest,
};
pub use responses::{
    CacheGetResponse, DataResponse, ErrorResponse, HealthResponse, StatsResponse,
    SuccessResponse,
};
