//! Record store for office locations.
//!
//! The store is the only owner of the office collection. Newest records come
//! first. Ids are assigned here and never change afterwards.

mod memory;

pub use memory::*;

use crate::models::{OfficeBody, OfficeRecord};

/// Storage seam used by the HTTP handlers.
pub trait RecordStore: Send + Sync + 'static {
    /// Snapshot of the whole collection, newest first.
    fn list(&self) -> Vec<OfficeRecord>;

    /// Assign a fresh id, prepend the record and return it.
    fn insert(&self, body: OfficeBody) -> OfficeRecord;

    /// Overwrite every field of the record with `id`, keeping its position.
    ///
    /// Returns the updated record, or `None` when the id is unknown.
    fn replace(&self, id: &str, body: OfficeBody) -> Option<OfficeRecord>;

    /// Remove the record with `id`. Returns whether anything was removed.
    fn remove(&self, id: &str) -> bool;
}

/// Records every fresh store starts with when seeding is enabled.
pub fn seed_records() -> Vec<OfficeRecord> {
    [
        "550e8400-e29b-41d4-a716-446655440000",
        "7b1f3835-45b0-4d43-8c81-fc94478f2073",
        "9a519180-6abf-4c68-8124-6e167abff8f8",
    ]
    .into_iter()
    .map(|id| {
        OfficeRecord::from_body(
            id.to_string(),
            OfficeBody {
                title: "Headquarters".to_string(),
                address: "3763 W. Dallas St.".to_string(),
                fullname: "Hellena John".to_string(),
                job: "Software Tester".to_string(),
                email: "georgia.young@example.com".to_string(),
                phone: "(808) 555-0111".to_string(),
            },
        )
    })
    .collect()
}
