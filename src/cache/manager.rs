//! Time-expiring response cache
//!
//! Provides a `Cache` that keeps raw response bodies in memory keyed by request
//! URL, hides entries older than the configured interval, and runs a reaper
//! task that physically removes them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::reaper;
use super::store::EntryStore;

/// Errors that can occur when constructing a cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The freshness interval must be greater than zero
    #[error("cache interval must be greater than zero")]
    ZeroInterval,

    /// The reaper needs a Tokio runtime to run on
    #[error("cache must be created inside a Tokio runtime")]
    NoRuntime,
}

/// Shared state behind every `Cache` handle
#[derive(Debug)]
struct Inner {
    interval: Duration,
    store: Arc<Mutex<EntryStore>>,
    shutdown: CancellationToken,
    /// Stops the reaper once the last handle is dropped
    _reaper_guard: DropGuard,
}

/// In-memory cache of raw response bodies with time-based expiry
///
/// Cloning a `Cache` yields another handle to the same store. `get` only
/// returns entries younger than `interval`, independent of when the reaper last
/// ran; the reaper sweeps every `interval` to reclaim memory.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

impl Cache {
    /// Creates an empty cache and starts its reaper on the current runtime
    ///
    /// # Arguments
    /// * `interval` - Freshness window and sweep period
    ///
    /// # Returns
    /// * `Ok(Cache)` on success
    /// * `Err(CacheError::ZeroInterval)` if `interval` is zero
    /// * `Err(CacheError::NoRuntime)` if called outside a Tokio runtime
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        if interval.is_zero() {
            return Err(CacheError::ZeroInterval);
        }
        if Handle::try_current().is_err() {
            return Err(CacheError::NoRuntime);
        }

        let store = Arc::new(Mutex::new(EntryStore::default()));
        let shutdown = CancellationToken::new();
        reaper::spawn(store.clone(), interval, shutdown.clone());

        Ok(Self {
            inner: Arc::new(Inner {
                interval,
                store,
                _reaper_guard: shutdown.clone().drop_guard(),
                shutdown,
            }),
        })
    }

    /// Stores `value` under `key`, replacing any existing entry
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let value = value.into();
        self.inner.store.lock().insert(key, value, Instant::now());
    }

    /// Returns a copy of the value for `key` if it is still fresh
    ///
    /// A miss covers both absent keys and entries that have reached the
    /// interval but have not been swept yet.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner
            .store
            .lock()
            .get_fresh(key, Instant::now(), self.inner.interval)
            .map(<[u8]>::to_vec)
    }

    /// The configured freshness window
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Number of entries physically held, including expired ones not yet reaped
    pub fn len(&self) -> usize {
        self.inner.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops the reaper; lookups keep enforcing freshness afterwards
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
    }
}
