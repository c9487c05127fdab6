//! Record store holding immutable snapshots of domain records.
//!
//! Readers receive a shared [`Snapshot`]; replacing the store's contents swaps
//! in a new snapshot and never touches one a reader already holds.

pub mod snapshot;

use crate::record::Record;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when populating a store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Two records share an id.
    #[error("Duplicate record id: {0}")]
    Duplicate(String),
    /// A record violates a field invariant.
    #[error("Invalid record {id}: {reason}")]
    Invalid {
        /// Id of the offending record.
        id: String,
        /// Which invariant failed.
        reason: String,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// An immutable, ordered, cheaply cloneable view of a store's records.
pub type Snapshot<R> = Arc<[R]>;

/// Narrow read interface over a record source.
pub trait RecordStore<R: Record>: Send + Sync {
    /// Returns every record in insertion order.
    fn all(&self) -> Snapshot<R>;

    /// Finds a record by id.
    fn get(&self, id: &str) -> Option<R> {
        self.all().iter().find(|r| r.record_id() == id).cloned()
    }

    /// Number of records.
    fn len(&self) -> usize {
        self.all().len()
    }

    /// Whether the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store populated from a fixed collection.
pub struct InMemoryRecordStore<R> {
    records: RwLock<Snapshot<R>>,
}

impl<R: Record> InMemoryRecordStore<R> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Creates a store from `records`, keeping their order.
    pub fn from_records(records: Vec<R>) -> StoreResult<Self> {
        validate_all(&records)?;
        debug!(count = records.len(), "record store populated");
        Ok(Self {
            records: RwLock::new(Arc::from(records)),
        })
    }

    /// Atomically replaces the store's contents.
    ///
    /// On error the previous snapshot stays in place.
    pub fn replace(&self, records: Vec<R>) -> StoreResult<()> {
        validate_all(&records)?;
        let snapshot: Snapshot<R> = Arc::from(records);
        let count = snapshot.len();
        *self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
        info!(count, "record store snapshot replaced");
        Ok(())
    }
}

impl<R: Record> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> for InMemoryRecordStore<R> {
    fn all(&self) -> Snapshot<R> {
        Arc::clone(&self.records.read().unwrap_or_else(PoisonError::into_inner))
    }
}

fn validate_all<R: Record>(records: &[R]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.record_id();
        record.validate().map_err(|reason| StoreError::Invalid {
            id: id.to_string(),
            reason,
        })?;
        if !seen.insert(id) {
            return Err(StoreError::Duplicate(id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, AssetType, Criticality, ThreatEntry};

    fn asset(id: &str, score: u8) -> Asset {
        Asset::new(
            id,
            format!("asset {}", id),
            AssetType::Server,
            Criticality::Medium,
            "ops",
            score,
        )
    }

    #[test]
    fn test_preserves_insertion_order() {
        let store =
            InMemoryRecordStore::from_records(vec![asset("B", 1), asset("A", 2), asset("C", 3)])
                .unwrap();
        let ids: Vec<String> = store.all().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = InMemoryRecordStore::from_records(vec![asset("A", 1), asset("A", 2)])
            .err()
            .unwrap();
        assert_eq!(err, StoreError::Duplicate("A".to_string()));
    }

    #[test]
    fn test_rejects_invalid_records() {
        let err = InMemoryRecordStore::from_records(vec![asset("A", 120)])
            .err()
            .unwrap();
        assert!(matches!(
            err,
            StoreError::Invalid { ref id, .. } if id == "A"
        ));

        let err = InMemoryRecordStore::from_records(vec![ThreatEntry::new("DDoS", 45, 55, 188)])
            .err()
            .unwrap();
        assert!(err.to_string().contains("mitigation"));
    }

    #[test]
    fn test_get_by_id() {
        let store = InMemoryRecordStore::from_records(vec![asset("A", 1), asset("B", 2)]).unwrap();
        assert_eq!(store.get("B").map(|a| a.risk_score), Some(2));
        assert!(store.get("Z").is_none());
    }

    #[test]
    fn test_replace_keeps_reader_snapshots() {
        let store = InMemoryRecordStore::from_records(vec![asset("A", 1)]).unwrap();
        let before = store.all();

        store.replace(vec![asset("X", 5), asset("Y", 6)]).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);

        assert!(store.replace(vec![asset("Q", 1), asset("Q", 2)]).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_empty_store() {
        let store: InMemoryRecordStore<Asset> = InMemoryRecordStore::default();
        assert!(store.is_empty());
        assert!(store.all().is_empty());
    }
}
