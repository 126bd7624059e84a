//! In-memory response cache with time-based expiry
//!
//! This module provides a cache that stores raw API response bodies keyed by
//! request URL. Lookups only return entries younger than the configured interval,
//! and a background reaper removes expired entries once per interval.

mod manager;
mod reaper;
mod store;

pub use manager::{Cache, CacheError};
