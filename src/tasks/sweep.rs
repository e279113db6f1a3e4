//! Expiry Sweep Task
//!
//! Periodically deletes stale entries that no read has touched.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::TtlCache;

/// Spawns a task that calls [`TtlCache::sweep_expired`] every
/// `interval_secs` seconds until aborted.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_sweep_task(cache: Arc<TtlCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            match cache.sweep_expired().await {
                Ok(0) => debug!("Expiry sweep: no stale entries found"),
                Ok(removed) => info!("Expiry sweep: removed {} stale entries", removed),
                // Next tick tries again.
                Err(e) => error!("Expiry sweep failed: {}", e),
            }
        }
    })
}
