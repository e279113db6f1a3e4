//! Guidance Server - backend for the student guidance app
//!
//! Caches market-trend data with a fixed TTL and stores student analyses
//! and user preferences in a key-value backend.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod namespace;
pub mod records;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
