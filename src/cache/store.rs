//! Entry store backing the in-memory cache
//!
//! A plain key → entry map with the point operations the cache needs. It holds
//! no lock of its own; `Cache` wraps it in a single mutex shared with the reaper.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One cached response payload
#[derive(Debug)]
struct CacheEntry {
    /// When the entry was inserted, never updated afterwards
    created_at: Instant,
    /// The raw response bytes
    value: Vec<u8>,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, max_age: Duration) -> bool {
        now.saturating_duration_since(self.created_at) < max_age
    }
}

/// Key → entry mapping for a single cache instance
#[derive(Debug, Default)]
pub(crate) struct EntryStore {
    entries: HashMap<String, CacheEntry>,
}

impl EntryStore {
    /// Inserts `value` under `key`, replacing any previous entry and its timestamp
    pub(crate) fn insert(&mut self, key: String, value: Vec<u8>, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                created_at: now,
                value,
            },
        );
    }

    /// Returns the stored bytes only if the entry is younger than `max_age`
    pub(crate) fn get_fresh(&self, key: &str, now: Instant, max_age: Duration) -> Option<&[u8]> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, max_age))
            .map(|entry| entry.value.as_slice())
    }

    /// Deletes every entry aged `max_age` or older, returning how many were removed
    pub(crate) fn sweep(&mut self, now: Instant, max_age: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(now, max_age));
        before - self.entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
