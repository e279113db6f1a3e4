//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: removes stale market-trends entries at a configured
//!   interval. Off unless `SWEEP_INTERVAL` is set; reads evict lazily either way.

mod sweep;

pub use sweep::spawn_sweep_task;
