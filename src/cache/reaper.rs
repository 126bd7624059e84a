//! Background sweep loop that reclaims expired cache entries
//!
//! The reaper only frees memory. Freshness is enforced by `Cache::get` on
//! every lookup, so a late or skipped sweep never exposes stale data.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::store::EntryStore;

/// Spawns the reaper task for a store
///
/// Every `interval` the task locks the store and drops entries aged `interval`
/// or older. It runs until `shutdown` is cancelled.
pub(crate) fn spawn(
    store: Arc<Mutex<EntryStore>>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first tick (immediate)
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = store.lock().sweep(Instant::now(), interval);
                    if removed > 0 {
                        trace!(removed, "reaped expired cache entries");
                    }
                }
                _ = shutdown.cancelled() => {
                    debug!("cache reaper stopped");
                    break;
                }
            }
        }
    })
}
