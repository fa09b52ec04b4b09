// Adapters layer: concrete record stores behind the `RecordStore` port.

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;

use crate::domain::ports::Record;
use crate::utils::error::{RegistryError, Result};

// Vec-level CRUD shared by every backend.

pub(crate) fn insert_record<R: Record>(records: &mut Vec<R>, record: R) -> Result<R> {
    record.validate()?;
    if records.iter().any(|r| r.id() == record.id()) {
        return Err(RegistryError::already_exists(R::KIND, record.id()));
    }
    records.push(record.clone());
    Ok(record)
}

pub(crate) fn replace_record<R: Record>(records: &mut [R], record: R) -> Result<R> {
    record.validate()?;
    let slot = records
        .iter_mut()
        .find(|r| r.id() == record.id())
        .ok_or_else(|| RegistryError::not_found(R::KIND, record.id()))?;
    *slot = record.clone();
    Ok(record)
}

pub(crate) fn remove_record<R: Record>(records: &mut Vec<R>, id: &str) -> Result<()> {
    let before = records.len();
    records.retain(|r| r.id() != id);
    if records.len() == before {
        return Err(RegistryError::not_found(R::KIND, id));
    }
    Ok(())
}
