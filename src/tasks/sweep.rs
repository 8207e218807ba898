//! TTL Sweep Task
//!
//! Background task that periodically removes cache entries whose age exceeds
//! the TTL, independent of access recency. The sweep takes the same cache
//! lock as foreground operations, so it never races a put or get.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::RecordCache;

// == Sweep Handle ==
/// Owns the spawned sweep task. `shutdown` stops the sweep and is
/// idempotent; dropping the handle without calling it leaves the task to be
/// torn down with the runtime.
#[derive(Debug)]
pub struct SweepHandle {
    handle: Option<JoinHandle<()>>,
}

impl SweepHandle {
    /// Stops the background sweep. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("cache sweep task stopped");
        }
    }

    /// True once `shutdown` has run.
    pub fn is_shut_down(&self) -> bool {
        self.handle.is_none()
    }
}

// == Spawn Sweep Task ==
/// Spawns a task that sweeps the cache for expired entries at a fixed
/// interval.
///
/// The task sleeps between runs and acquires the cache write lock for each
/// sweep, sharing the foreground locking discipline.
///
/// # Arguments
/// * `cache` - shared cache handle
/// * `sweep_interval_secs` - seconds between sweep runs
pub fn spawn_sweep_task(
    cache: Arc<RwLock<RecordCache>>,
    sweep_interval_secs: u64,
) -> SweepHandle {
    let interval = Duration::from_secs(sweep_interval_secs);

    let handle = tokio::spawn(async move {
        info!(interval_secs = sweep_interval_secs, "cache sweep task started");

        loop {
            tokio::time::sleep(interval).await;

            let (removed, stats) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.sweep_expired();
                (removed, cache_guard.stats())
            };

            if removed > 0 {
                info!(removed, "sweep removed expired cache entries");
            } else {
                debug!("sweep found no expired entries");
            }
            debug!(
                entries = stats.total_entries,
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                expirations = stats.expirations,
                hit_rate = format!("{:.2}", stats.hit_rate()),
                "cache statistics"
            );
        }
    });

    SweepHandle {
        handle: Some(handle),
    }
}
