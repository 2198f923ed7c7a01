//! Cache Store Module
//!
//! HashMap-backed store with per-entry TTL, lazy expiry and prefix invalidation.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == TTL Cache ==
/// Short-lived memoization keyed by strings.
///
/// Expired entries are never swept on their own: they are dropped when a
/// `get` observes them, when they are invalidated, or by an explicit
/// [`purge_expired`](TtlCache::purge_expired). Nothing else bounds the size.
#[derive(Debug)]
pub struct TtlCache<T, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Usage counters
    stats: CacheStats,
    /// Time source for stamping and expiring entries
    clock: C,
}

impl<T> TtlCache<T, SystemClock> {
    // == Constructor ==
    /// Creates an empty cache driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T> Default for TtlCache<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> TtlCache<T, C> {
    /// Creates an empty cache driven by `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry expires at `now + ttl`, measured when `set` is called.
    pub fn set(&mut self, key: impl Into<String>, value: T, ttl: Duration) {
        let key = key.into();
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl);
        trace!(key = %key, expires_at = entry.expires_at, "cache set");

        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Invalidate ==
    /// Removes the entry for `key`. Returns whether an entry was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            trace!(key = %key, "cache invalidate");
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Invalidate By Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Matching is a case-sensitive byte prefix; an empty prefix removes
    /// everything. Returns the number of entries removed.
    pub fn invalidate_by_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();

        debug!(prefix = %prefix, removed, "cache prefix invalidation");
        self.stats.record_invalidations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Purge Expired ==
    /// Removes all entries that have expired. Returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the usage counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone, C: Clock> TtlCache<T, C> {
    // == Get ==
    /// Returns a copy of the live value for `key`.
    ///
    /// An entry found expired is removed and reported as absent, exactly
    /// like a key that was never set.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = self.clock.now_ms();
        let expired = self.entries.get(key).map(|e| e.is_expired_at(now));

        match expired {
            Some(false) => {
                self.stats.record_hit();
                self.entries.get(key).map(|e| e.value.clone())
            }
            Some(true) => {
                trace!(key = %key, "cache entry expired, removing");
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Get Or Insert ==
    /// Returns the live value for `key`, or computes it with `fetch`,
    /// stores it for `ttl` and returns it.
    pub fn get_or_insert_with<F>(&mut self, key: &str, ttl: Duration, fetch: F) -> T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = fetch();
        self.set(key, value.clone(), ttl);
        value
    }
}
