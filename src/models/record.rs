//! Record Entity Module
//!
//! Defines the managed domain entity and its lifecycle timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Record ==
/// The managed entity: a catalogued item with a price and release date.
///
/// The numeric `id` is assigned by the store and is `Some` if and only if
/// the record has been persisted. The `uuid` is generated at creation and
/// identifies the record independently of the numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Store-assigned numeric identifier, None until persisted
    pub id: Option<i64>,
    /// Universal identifier, always set
    pub uuid: Uuid,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Non-negative price
    pub price: f64,
    /// Release date
    pub release_date: NaiveDate,
    /// Set once, at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Record {
    // == Constructor ==
    /// Creates a new unpersisted record with a fresh uuid and timestamps.
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64, release_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            price,
            release_date,
            created_at: now,
            updated_at: now,
        }
    }

    // == Is Persisted ==
    /// Returns true once the store has assigned a numeric id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    // == Touch ==
    /// Refreshes the updated-at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // == Validate ==
    /// Validates the record data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("Record name cannot be empty".to_string());
        }
        if self.price < 0.0 {
            return Some("Record price cannot be negative".to_string());
        }
        None
    }
}
