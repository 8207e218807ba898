//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction, keyed by the
//! record's numeric identifier.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Ids are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Order of ids by access time
    order: VecDeque<i64>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks an id as recently used (moves to front).
    ///
    /// If the id exists, removes it first then adds to front.
    /// If the id is new, just adds to front.
    pub fn touch(&mut self, id: i64) {
        self.remove(id);
        self.order.push_front(id);
    }

    // == Remove ==
    /// Removes an id from the tracker.
    pub fn remove(&mut self, id: i64) {
        self.order.retain(|k| *k != id);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used id.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<i64> {
        self.order.pop_back()
    }

    // == Peek Oldest ==
    /// Returns the least recently used id without removing it.
    pub fn peek_oldest(&self) -> Option<i64> {
        self.order.back().copied()
    }

    // == Length ==
    /// Returns the number of tracked ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if an id is being tracked.
    #[allow(dead_code)]
    pub fn contains(&self, id: i64) -> bool {
        self.order.iter().any(|k| *k == id)
    }

    // == Clear ==
    /// Drops all tracked ids.
    pub fn clear(&mut self) {
        self.order.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_touch_new_id() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(2);
        lru.touch(3);

        assert_eq!(lru.len(), 3);
        // id 1 is oldest (added first)
        assert_eq!(lru.peek_oldest(), Some(1));
    }

    #[test]
    fn test_lru_touch_existing_id() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(2);
        lru.touch(3);

        // Touch 1 again - should move to front
        lru.touch(1);

        assert_eq!(lru.len(), 3);
        // 2 is now oldest
        assert_eq!(lru.peek_oldest(), Some(2));
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(2);
        lru.touch(3);

        assert_eq!(lru.evict_oldest(), Some(1));
        assert_eq!(lru.len(), 2);

        assert_eq!(lru.evict_oldest(), Some(2));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(2);
        lru.touch(3);

        lru.remove(2);

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(2));
        assert!(lru.contains(1));
        assert!(lru.contains(3));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruTracker::new();

        lru.touch(10);
        lru.touch(20);
        lru.touch(30);

        // Access in different order: oldest-to-newest becomes 10, 30, 20
        lru.touch(10);
        lru.touch(30);
        lru.touch(20);

        assert_eq!(lru.evict_oldest(), Some(10));
        assert_eq!(lru.evict_oldest(), Some(30));
        assert_eq!(lru.evict_oldest(), Some(20));
    }

    #[test]
    fn test_lru_remove_nonexistent_id() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(2);

        lru.remove(99);

        assert_eq!(lru.len(), 2);
        assert!(lru.contains(1));
        assert!(lru.contains(2));
    }

    #[test]
    fn test_lru_touch_same_id_multiple_times() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(1);
        lru.touch(1);

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest(), Some(1));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruTracker::new();

        lru.touch(1);
        lru.touch(2);
        lru.clear();

        assert!(lru.is_empty());
        assert_eq!(lru.evict_oldest(), None);
    }
}
