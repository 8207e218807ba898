//! Record Cache Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL
//! expiration, keyed by the record's numeric identifier. The cache never
//! queries the store; misses are the caller's responsibility to backfill.

use std::collections::HashMap;

use chrono::Duration;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::models::Record;

// == Record Cache ==
/// Bounded record cache with LRU eviction and sweep-based TTL expiration.
#[derive(Debug)]
pub struct RecordCache {
    /// Id-to-entry storage
    entries: HashMap<i64, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum entry age before the sweep removes it
    ttl: Duration,
}

impl RecordCache {
    // == Constructor ==
    /// Creates a new RecordCache with the given capacity and TTL in seconds.
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    // == Put ==
    /// Inserts or refreshes a record under its numeric id.
    ///
    /// Refreshes recency order and the entry's age baseline. If the insert
    /// would exceed capacity, the single least recently used entry is
    /// evicted first.
    pub fn put(&mut self, id: i64, record: Record) {
        let is_overwrite = self.entries.contains_key(&id);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(id = evicted, "evicted least recently used cache entry");
            }
        }

        self.entries.insert(id, CacheEntry::new(record));
        self.lru.touch(id);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a copy of the cached record, promoting it to most recently
    /// used on a hit. A miss returns None, never an error.
    pub fn get(&mut self, id: i64) -> Option<Record> {
        match self.entries.get(&id) {
            Some(entry) => {
                let record = entry.record.clone();
                self.lru.touch(id);
                self.stats.record_hit();
                Some(record)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Removes an entry by id. Returns true if an entry was present.
    pub fn remove(&mut self, id: i64) -> bool {
        let removed = self.entries.remove(&id).is_some();
        if removed {
            self.lru.remove(id);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Sweep Expired ==
    /// Removes every entry whose age exceeds the TTL, independent of access
    /// recency. Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired: Vec<i64> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            self.entries.remove(id);
            self.lru.remove(*id);
            self.stats.record_expiration();
            debug!(id, "swept expired cache entry");
        }

        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backdates an entry's age baseline. Test hook for the sweep.
    #[cfg(test)]
    pub(crate) fn backdate(&mut self, id: i64, age_secs: i64) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.refreshed_at = chrono::Utc::now() - Duration::seconds(age_secs);
        }
    }
}
