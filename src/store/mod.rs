//! Store Module
//!
//! The asynchronous CRUD contract for the durable record store, plus the
//! in-memory reference implementation used by `main` and by tests. The
//! production store is an external collaborator behind this trait; every
//! operation resolves to exactly one terminal outcome.

mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Record;

pub use memory::MemoryStore;

// == Store Error ==
/// Typed failure reported by a store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The targeted record does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The operation conflicts with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The record is not acceptable to the store
    #[error("Invalid record: {0}")]
    Invalid(String),

    /// The store backend is unreachable or failing
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Record Store Contract ==
/// Asynchronous CRUD contract consumed by the dispatcher.
///
/// Lookups by identifier return `Ok(None)` when nothing matches; absence is
/// not a store failure. Collection lookups return complete result sets.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every record.
    async fn find_all(&self) -> StoreResult<Vec<Record>>;

    /// Looks up a record by numeric id.
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Record>>;

    /// Looks up a record by universal identifier.
    async fn find_by_uuid(&self, uuid: Uuid) -> StoreResult<Option<Record>>;

    /// Returns records whose name contains the given text.
    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Record>>;

    /// Returns records in the given category.
    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<Record>>;

    /// Returns records released in the given year.
    async fn find_by_year(&self, year: i32) -> StoreResult<Vec<Record>>;

    /// Persists a new record, assigning its numeric id.
    async fn save(&self, record: Record) -> StoreResult<Record>;

    /// Replaces a persisted record, refreshing its updated-at timestamp.
    async fn update(&self, record: Record) -> StoreResult<Record>;

    /// Deletes by numeric id. Returns true if a record was removed.
    async fn delete_by_id(&self, id: i64) -> StoreResult<bool>;

    /// Deletes by universal identifier, returning the removed record.
    async fn delete_by_uuid(&self, uuid: Uuid) -> StoreResult<Option<Record>>;

    /// Removes every record.
    async fn delete_all(&self) -> StoreResult<()>;
}
