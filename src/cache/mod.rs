//! Cache Module
//!
//! Provides the in-memory record cache sitting in front of the store, with
//! LRU capacity eviction and periodic TTL expiration.

mod entry;
mod lru;
mod records;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use records::RecordCache;
pub use stats::CacheStats;
