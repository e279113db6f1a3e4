//! Cache Module
//!
//! TTL caching over the key-value backend with lazy, read-triggered eviction.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::{CacheStats, StatsCounters};
pub use store::TtlCache;
