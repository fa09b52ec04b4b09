use crate::adapters::{insert_record, remove_record, replace_record};
use crate::domain::ports::{Record, RecordStore};
use crate::utils::error::Result;
use std::cell::RefCell;

/// Volatile store for tests and embedding. Single-threaded.
#[derive(Debug)]
pub struct MemoryStore<R> {
    records: RefCell<Vec<R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
        }
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> for MemoryStore<R> {
    fn find(&self, id: &str) -> Result<Option<R>> {
        Ok(self.records.borrow().iter().find(|r| r.id() == id).cloned())
    }

    fn get_all(&self) -> Result<Vec<R>> {
        Ok(self.records.borrow().clone())
    }

    fn add(&self, record: R) -> Result<R> {
        insert_record(&mut self.records.borrow_mut(), record)
    }

    fn update(&self, record: R) -> Result<R> {
        replace_record(&mut self.records.borrow_mut(), record)
    }

    fn delete(&self, id: &str) -> Result<()> {
        remove_record(&mut self.records.borrow_mut(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EnrollmentRecord, EnrollmentStatus};
    use crate::utils::error::RegistryError;

    #[test]
    fn test_memory_store_contract() {
        let store = MemoryStore::new();
        let record = store.add(EnrollmentRecord::active("s1", "c1")).unwrap();
        assert!(store.exists(&record.id).unwrap());

        let mut dropped = record.clone();
        dropped.status = EnrollmentStatus::Dropped;
        store.update(dropped).unwrap();
        assert_eq!(
            store.get_by_id(&record.id).unwrap().status,
            EnrollmentStatus::Dropped
        );

        assert!(matches!(
            store.add(record.clone()),
            Err(RegistryError::AlreadyExists { .. })
        ));
        store.delete(&record.id).unwrap();
        assert!(matches!(
            store.delete(&record.id),
            Err(RegistryError::NotFound { .. })
        ));
    }
}
