//! API Routes
//!
//! Configures the Axum router with all guidance server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    analysis_get_handler, analysis_put_handler, analytics_handler, cache_delete_handler,
    cache_get_handler, cache_market_data_handler, cache_put_handler, health_handler,
    not_found_handler, preferences_get_handler, preferences_put_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /cache/:field` - Cache a market-trends payload
/// - `GET /cache/:field` - Read a fresh market-trends payload
/// - `DELETE /cache/:field` - Drop a cached payload
/// - `POST /cache-market-data`, `GET /market-trends/:field` - Older paths for the same cache
/// - `POST /student-analysis`, `GET /student-analysis/:student_id`
/// - `POST /user-preferences`, `GET /user-preferences/:user_id`
/// - `GET /analytics` - Record counts
/// - `GET /stats` - Cache counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/cache/:field",
            post(cache_put_handler)
                .get(cache_get_handler)
                .delete(cache_delete_handler),
        )
        .route("/cache-market-data", post(cache_market_data_handler))
        .route("/market-trends/:field", get(cache_get_handler))
        .route("/student-analysis", post(analysis_put_handler))
        .route("/student-analysis/:student_id", get(analysis_get_handler))
        .route("/user-preferences", post(preferences_put_handler))
        .route("/user-preferences/:user_id", get(preferences_get_handler))
        .route("/analytics", get(analytics_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
