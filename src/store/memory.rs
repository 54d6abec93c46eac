//! In-memory record store. Lives as long as the process, nothing is persisted.

use std::sync::{Mutex, MutexGuard};

use super::RecordStore;
use crate::models::{OfficeBody, OfficeRecord};

/// Vec-backed store guarded by a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<OfficeRecord>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `records`, kept in the given order.
    pub fn with_records(records: Vec<OfficeRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Store pre-filled with the default seed records.
    pub fn seeded() -> Self {
        Self::with_records(super::seed_records())
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    // Every critical section is a plain Vec operation, so a poisoned lock
    // still holds a consistent collection.
    fn records(&self) -> MutexGuard<'_, Vec<OfficeRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> Vec<OfficeRecord> {
        self.records().clone()
    }

    fn insert(&self, body: OfficeBody) -> OfficeRecord {
        let mut records = self.records();
        let mut id = uuid::Uuid::new_v4().to_string();
        while records.iter().any(|r| r.id == id) {
            id = uuid::Uuid::new_v4().to_string();
        }

        let record = OfficeRecord::from_body(id, body);
        records.insert(0, record.clone());
        tracing::debug!(id = %record.id, total = records.len(), "Inserted office");
        record
    }

    fn replace(&self, id: &str, body: OfficeBody) -> Option<OfficeRecord> {
        let mut records = self.records();
        let record = records.iter_mut().find(|r| r.id == id)?;
        record.apply(body);
        tracing::debug!(id, "Replaced office");
        Some(record.clone())
    }

    fn remove(&self, id: &str) -> bool {
        let mut records = self.records();
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;
        tracing::debug!(id, removed, "Removed office");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(title: &str) -> OfficeBody {
        OfficeBody {
            title: title.to_string(),
            address: "1 Main St.".to_string(),
            fullname: "Jane Roe".to_string(),
            job: "Manager".to_string(),
            email: "jane@example.com".to_string(),
            phone: "(808) 555-0100".to_string(),
        }
    }

    #[test]
    fn test_seeded_store_has_three_records() {
        let store = MemoryStore::seeded();
        let records = store.list();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(records[2].id, "9a519180-6abf-4c68-8124-6e167abff8f8");
        assert!(records.iter().all(|r| r.title == "Headquarters"));
    }

    #[test]
    fn test_insert_prepends_with_unique_id() {
        let store = MemoryStore::seeded();
        let before: Vec<String> = store.list().into_iter().map(|r| r.id).collect();

        let created = store.insert(body("Branch A"));
        let records = store.list();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0], created);
        assert_eq!(records[0].title, "Branch A");
        assert!(!before.contains(&created.id));
        assert!(uuid::Uuid::parse_str(&created.id).is_ok());
    }

    #[test]
    fn test_insert_ids_never_repeat() {
        let store = MemoryStore::new();
        let first = store.insert(body("One"));
        let second = store.insert(body("Two"));

        assert_ne!(first.id, second.id);
        assert_eq!(store.list()[0].id, second.id);
    }

    #[test]
    fn test_replace_keeps_id_and_position() {
        let store = MemoryStore::seeded();
        let target = store.list()[1].id.clone();

        let updated = store.replace(&target, body("Renamed")).unwrap();
        let records = store.list();

        assert_eq!(updated.id, target);
        assert_eq!(records[1].id, target);
        assert_eq!(records[1].title, "Renamed");
        assert_eq!(records[1].detail.fullname, "Jane Roe");
        assert_eq!(records[0].title, "Headquarters");
    }

    #[test]
    fn test_replace_unknown_id_is_noop() {
        let store = MemoryStore::seeded();
        let before = store.list();

        assert!(store.replace("missing", body("Nope")).is_none());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_remove_only_touches_matching_record() {
        let store = MemoryStore::seeded();
        let records = store.list();

        assert!(store.remove(&records[1].id));
        let after = store.list();
        assert_eq!(after.len(), 2);
        assert_eq!(after[0], records[0]);
        assert_eq!(after[1], records[2]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let store = MemoryStore::seeded();
        let before = store.list();

        assert!(!store.remove("missing"));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_stores_are_isolated() {
        let first = MemoryStore::seeded();
        let second = MemoryStore::seeded();

        first.insert(body("Only in first"));

        assert_eq!(first.len(), 4);
        assert_eq!(second.len(), 3);
        assert!(MemoryStore::new().is_empty());
    }
}
