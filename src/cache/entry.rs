//! Cache Entry Module
//!
//! Defines the structure for individual cache entries. Entries are copies of
//! store records, never shared references into the store.

use chrono::{DateTime, Duration, Utc};

use crate::models::Record;

// == Cache Entry ==
/// A cached record plus the age baseline used by the TTL sweep.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Copy of the stored record
    pub record: Record,
    /// Age baseline, reset on every insertion
    pub refreshed_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry with the age baseline set to now.
    pub fn new(record: Record) -> Self {
        Self {
            record,
            refreshed_at: Utc::now(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's age exceeds the given TTL.
    ///
    /// Boundary condition: an entry is expired when its age is greater than
    /// or equal to the TTL, so an entry is swept as soon as the full TTL has
    /// elapsed since its last insertion.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.refreshed_at >= ttl
    }

    // == Age ==
    /// Returns the time elapsed since the last insertion refresh.
    pub fn age(&self) -> Duration {
        Utc::now() - self.refreshed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_record() -> Record {
        Record::new("Boba Fett", "Star Wars", 19.99, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
    }

    #[test]
    fn test_fresh_entry_is_not_expired() {
        let entry = CacheEntry::new(sample_record());
        assert!(!entry.is_expired(Duration::seconds(60)));
    }

    #[test]
    fn test_entry_expires_past_ttl() {
        let mut entry = CacheEntry::new(sample_record());
        // Age the entry artificially instead of sleeping
        entry.refreshed_at = Utc::now() - Duration::seconds(61);
        assert!(entry.is_expired(Duration::seconds(60)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let mut entry = CacheEntry::new(sample_record());
        entry.refreshed_at = Utc::now() - Duration::seconds(60);
        assert!(entry.is_expired(Duration::seconds(60)), "Entry should be expired at boundary");
    }

    #[test]
    fn test_age_grows() {
        let mut entry = CacheEntry::new(sample_record());
        entry.refreshed_at = Utc::now() - Duration::seconds(10);
        assert!(entry.age() >= Duration::seconds(10));
    }
}
