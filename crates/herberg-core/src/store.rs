use serde_json::Value;

use crate::entity::EntityKind;
use crate::error::StoreError;

/// A flat field-name-to-value mapping. The store is schema-agnostic: it never
/// interprets fields beyond `id`.
pub type Record = serde_json::Map<String, Value>;

/// Extract the `id` field of a record.
pub fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// Trait for the durable, typed-by-name collection of entity records.
///
/// Within each kind, insertion order is preserved and is the iteration order
/// for `list`. Mutating operations flush the full store state to durable
/// storage before returning. Implementations must serialize mutations against
/// each other and against reads (reader-writer discipline).
pub trait DataStore: Send + Sync {
    /// Append a record to the sequence for `kind`, creating the sequence if
    /// absent. The record must already carry an `id`; the store performs no
    /// duplicate-id check (existing records are replaced via `update`).
    fn save(&self, kind: EntityKind, record: Record) -> Result<(), StoreError>;

    /// Linear scan of the kind's sequence. A miss is `None`, never an error.
    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Record>, StoreError>;

    /// Replace the existing record with the same id in place, preserving its
    /// position. Not an upsert: fails with `NotFound` if no such record.
    fn update(&self, kind: EntityKind, record: Record) -> Result<(), StoreError>;

    /// Remove the first record with the matching id. `NotFound` if absent.
    fn delete(&self, kind: EntityKind, id: &str) -> Result<(), StoreError>;

    /// The full sequence for `kind`; an unknown kind yields an empty list.
    fn list(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError>;
}

// In-memory implementation for testing the validation and directory layers.
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory store with the same ordering and not-found semantics as the
    /// file-backed store, minus the flush.
    #[derive(Default)]
    pub struct InMemoryStore {
        records: RwLock<HashMap<EntityKind, Vec<Record>>>,
    }

    impl InMemoryStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DataStore for InMemoryStore {
        fn save(&self, kind: EntityKind, record: Record) -> Result<(), StoreError> {
            if record_id(&record).is_none() {
                return Err(StoreError::MissingId(kind));
            }
            let mut records = self.records.write().unwrap();
            records.entry(kind).or_default().push(record);
            Ok(())
        }

        fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Record>, StoreError> {
            let records = self.records.read().unwrap();
            Ok(records
                .get(&kind)
                .and_then(|seq| seq.iter().find(|r| record_id(r) == Some(id)))
                .cloned())
        }

        fn update(&self, kind: EntityKind, record: Record) -> Result<(), StoreError> {
            let id = record_id(&record)
                .ok_or(StoreError::MissingId(kind))?
                .to_string();
            let mut records = self.records.write().unwrap();
            let seq = records
                .get_mut(&kind)
                .ok_or_else(|| StoreError::NotFound {
                    kind,
                    id: id.clone(),
                })?;
            match seq.iter_mut().find(|r| record_id(r) == Some(&id)) {
                Some(slot) => {
                    *slot = record;
                    Ok(())
                }
                None => Err(StoreError::NotFound { kind, id }),
            }
        }

        fn delete(&self, kind: EntityKind, id: &str) -> Result<(), StoreError> {
            let mut records = self.records.write().unwrap();
            let seq = records.get_mut(&kind).ok_or_else(|| StoreError::NotFound {
                kind,
                id: id.to_string(),
            })?;
            match seq.iter().position(|r| record_id(r) == Some(id)) {
                Some(pos) => {
                    seq.remove(pos);
                    Ok(())
                }
                None => Err(StoreError::NotFound {
                    kind,
                    id: id.to_string(),
                }),
            }
        }

        fn list(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
            let records = self.records.read().unwrap();
            Ok(records.get(&kind).cloned().unwrap_or_default())
        }
    }

}
