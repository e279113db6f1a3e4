//! API Module
//!
//! HTTP handlers and routing for the guidance server REST API.
//!
//! # Endpoints
//! - `POST|GET|DELETE /cache/:field` - Market-trends TTL cache
//! - `POST /student-analysis`, `GET /student-analysis/:student_id` - Analyses
//! - `POST /user-preferences`, `GET /user-preferences/:user_id` - Preferences
//! - `GET /analytics` - Record counts
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
