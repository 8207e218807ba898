//! In-Memory Store Module
//!
//! Reference implementation of the record store contract backed by a
//! HashMap. Stands in for the durable external store in `main` and in the
//! test suites.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Datelike;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Record;
use crate::store::{RecordStore, StoreError, StoreResult};

// == Memory Store ==
/// HashMap-backed store with atomically assigned numeric ids.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<HashMap<i64, Record>>,
    next_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Record>> {
        let records = self.records.read().await;
        let mut all: Vec<Record> = records.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Record>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> StoreResult<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.uuid == uuid).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Record>> {
        let needle = name.to_lowercase();
        let records = self.records.read().await;
        let mut found: Vec<Record> = records
            .values()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn find_by_category(&self, category: &str) -> StoreResult<Vec<Record>> {
        let records = self.records.read().await;
        let mut found: Vec<Record> = records
            .values()
            .filter(|r| r.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn find_by_year(&self, year: i32) -> StoreResult<Vec<Record>> {
        let records = self.records.read().await;
        let mut found: Vec<Record> = records
            .values()
            .filter(|r| r.release_date.year() == year)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn save(&self, mut record: Record) -> StoreResult<Record> {
        if record.id.is_some() {
            return Err(StoreError::Conflict(
                "record is already persisted; use update".to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.id = Some(id);

        self.records.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: Record) -> StoreResult<Record> {
        let id = record
            .id
            .ok_or_else(|| StoreError::Invalid("record has no id to update".to_string()))?;

        let mut records = self.records.write().await;
        let existing = records
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("record {id}")))?;

        // uuid and created_at are fixed at creation; only the mutable
        // fields are taken from the incoming record.
        existing.name = record.name;
        existing.category = record.category;
        existing.price = record.price;
        existing.release_date = record.release_date;
        existing.touch();

        Ok(existing.clone())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn delete_by_uuid(&self, uuid: Uuid) -> StoreResult<Option<Record>> {
        let mut records = self.records.write().await;
        let id = records
            .values()
            .find(|r| r.uuid == uuid)
            .and_then(|r| r.id);
        Ok(id.and_then(|id| records.remove(&id)))
    }

    async fn delete_all(&self) -> StoreResult<()> {
        self.records.write().await.clear();
        Ok(())
    }
}
