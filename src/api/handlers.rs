//! API Handlers
//!
//! HTTP request handlers for each guidance server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::Config;
use crate::error::Result;
use crate::kv::{KvStore, MemoryKvStore};
use crate::models::{
    CacheGetResponse, CachePutRequest, DataResponse, ErrorResponse, HealthResponse,
    MarketDataRequest, StatsResponse, StudentAnalysisRequest, SuccessResponse,
    UserPreferencesRequest,
};
use crate::records::{Analytics, RecordStore};

/// Application state shared across all handlers.
///
/// Built once at startup from an explicit store and clock, then cloned into
/// every request.
#[derive(Clone)]
pub struct AppState {
    /// Market-trends TTL cache
    pub market: Arc<TtlCache>,
    /// Analyses and preferences
    pub records: Arc<RecordStore>,
}

impl AppState {
    /// Creates a new AppState over the given backend and clock.
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, market_ttl_ms: u64) -> Self {
        Self {
            market: Arc::new(TtlCache::market_trends(
                store.clone(),
                clock.clone(),
                market_ttl_ms,
            )),
            records: Arc::new(RecordStore::new(store, clock)),
        }
    }

    /// Creates a new AppState from configuration, backed by an in-memory
    /// store and the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryKvStore::new()),
            Arc::new(SystemClock),
            config.market_ttl_ms,
        )
    }
}

// == Market Cache ==

/// Handler for POST /cache/:field
pub async fn cache_put_handler(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(req): Json<CachePutRequest>,
) -> Result<Json<SuccessResponse>> {
    let key = state.market.key_for(&field)?;
    state.market.put(&key, req.data).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Handler for GET /cache/:field
pub async fn cache_get_handler(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<CacheGetResponse>> {
    let key = state.market.key_for(&field)?;
    let data = state.market.get(&key).await?;

    Ok(Json(DataResponse::new(data)))
}

/// Handler for DELETE /cache/:field
pub async fn cache_delete_handler(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let key = state.market.key_for(&field)?;
    state.market.delete(&key).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Handler for POST /cache-market-data
pub async fn cache_market_data_handler(
    State(state): State<AppState>,
    Json(req): Json<MarketDataRequest>,
) -> Result<Json<SuccessResponse>> {
    let key = state.market.key_for(&req.field)?;
    state.market.put(&key, req.data).await?;

    Ok(Json(SuccessResponse::with_message("Market data cached")))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.market.stats(),
        state.market.ttl_ms(),
    ))
}

// == Records ==

/// Handler for POST /student-analysis
pub async fn analysis_put_handler(
    State(state): State<AppState>,
    Json(req): Json<StudentAnalysisRequest>,
) -> Result<Json<SuccessResponse>> {
    state
        .records
        .put_analysis(&req.student_id, req.analysis_data)
        .await?;

    Ok(Json(SuccessResponse::with_message(
        "Analysis stored successfully",
    )))
}

/// Handler for GET /student-analysis/:student_id
pub async fn analysis_get_handler(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<DataResponse<Value>>> {
    let data = state.records.get_analysis(&student_id).await?;
    Ok(Json(DataResponse::new(data)))
}

/// Handler for POST /user-preferences
pub async fn preferences_put_handler(
    State(state): State<AppState>,
    Json(req): Json<UserPreferencesRequest>,
) -> Result<Json<SuccessResponse>> {
    state
        .records
        .save_preferences(&req.user_id, req.preferences)
        .await?;

    Ok(Json(SuccessResponse::with_message("Preferences saved")))
}

/// Handler for GET /user-preferences/:user_id
pub async fn preferences_get_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DataResponse<Value>>> {
    let data = state.records.get_preferences(&user_id).await?;
    Ok(Json(DataResponse::new(data)))
}

/// Handler for GET /analytics
pub async fn analytics_handler(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Analytics>>> {
    let analytics = state.records.analytics().await?;
    Ok(Json(DataResponse::new(analytics)))
}

// == Misc ==

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found")),
    )
}
