use crate::utils::error::{EntityKind, RegistryError, Result};
use crate::utils::validation::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persisted record with a string identifier.
pub trait Record: Serialize + DeserializeOwned + Validate + Clone {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

/// CRUD over one kind of record, in insertion order.
pub trait RecordStore<R: Record> {
    fn find(&self, id: &str) -> Result<Option<R>>;

    fn get_all(&self) -> Result<Vec<R>>;

    /// Fails with `AlreadyExists` if the id is taken.
    fn add(&self, record: R) -> Result<R>;

    /// Fails with `NotFound` if the id is absent.
    fn update(&self, record: R) -> Result<R>;

    /// Fails with `NotFound` if the id is absent.
    fn delete(&self, id: &str) -> Result<()>;

    fn get_by_id(&self, id: &str) -> Result<R> {
        self.find(id)?
            .ok_or_else(|| RegistryError::not_found(R::KIND, id))
    }

    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.find(id)?.is_some())
    }
}
