//! JSON file persistence: one pretty-printed array of records per file.

use crate::adapters::{insert_record, remove_record, replace_record};
use crate::domain::ports::{Record, RecordStore};
use crate::utils::error::Result;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Every call re-reads the file and every mutation overwrites it.
#[derive(Debug, Clone)]
pub struct JsonFileStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: Record> JsonFileStore<R> {
    /// Opens the store, creating the parent directory and an empty `[]` file
    /// when missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let store = Self {
            path,
            _record: PhantomData,
        };
        if !store.path.exists() {
            store.save(&[])?;
        }
        debug!("{} store opened at {:?}", R::KIND, store.path);
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<R>> {
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<R> = serde_json::from_str(&content)?;
        debug!("Loaded {} {} records from {:?}", records.len(), R::KIND, self.path);
        Ok(records)
    }

    fn save(&self, records: &[R]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        debug!("Saved {} {} records to {:?}", records.len(), R::KIND, self.path);
        Ok(())
    }
}

impl<R: Record> RecordStore<R> for JsonFileStore<R> {
    fn find(&self, id: &str) -> Result<Option<R>> {
        Ok(self.load()?.into_iter().find(|r| r.id() == id))
    }

    fn get_all(&self) -> Result<Vec<R>> {
        self.load()
    }

    fn add(&self, record: R) -> Result<R> {
        let mut records = self.load()?;
        let record = insert_record(&mut records, record)?;
        self.save(&records)?;
        Ok(record)
    }

    fn update(&self, record: R) -> Result<R> {
        let mut records = self.load()?;
        let record = replace_record(&mut records, record)?;
        self.save(&records)?;
        Ok(record)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.load()?;
        remove_record(&mut records, id)?;
        self.save(&records)
    }
}
