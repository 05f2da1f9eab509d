//! Persistence for the single card slot.
//!
//! The slot holds one JSON object. Backends implement [`CardStore`]; callers
//! that only want a record use [`CardStore::load`], which never fails.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::card::CardRecord;

/// Name of the persisted slot.
pub const STORAGE_KEY: &str = "creditcycle_card";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("stored card in {slot} is not valid: {source}")]
    Corrupt {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialize card: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait CardStore {
    /// Raw contents of the slot, `None` when nothing has been saved.
    fn try_load(&self) -> Result<Option<CardRecord>, StoreError>;

    fn save(&mut self, record: &CardRecord) -> Result<(), StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;

    /// Last saved record, or the default record when the slot is empty or
    /// cannot be read.
    fn load(&self) -> CardRecord {
        match self.try_load() {
            Ok(Some(record)) => record,
            Ok(None) => CardRecord::default(),
            Err(err) => {
                tracing::warn!(error = %err, "falling back to default card");
                CardRecord::default()
            }
        }
    }
}

/// Slot kept in memory as serialized JSON, so it behaves like the file slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary slot contents, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl CardStore for MemoryStore {
    fn try_load(&self) -> Result<Option<CardRecord>, StoreError> {
        self.slot
            .as_deref()
            .map(|raw| {
                serde_json::from_str::<CardRecord>(raw).map_err(|source| StoreError::Corrupt {
                    slot: STORAGE_KEY.to_string(),
                    source,
                })
            })
            .transpose()
    }

    fn save(&mut self, record: &CardRecord) -> Result<(), StoreError> {
        self.slot = Some(serde_json::to_string(record)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}

/// Slot stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store using the default slot name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, STORAGE_KEY)
    }

    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CardStore for JsonFileStore {
    fn try_load(&self) -> Result<Option<CardRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_err(err)),
        };
        tracing::debug!(path = %self.path.display(), "loaded card slot");
        serde_json::from_str::<CardRecord>(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                slot: self.path.display().to_string(),
                source,
            })
    }

    fn save(&mut self, record: &CardRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json).map_err(|e| self.io_err(e))?;
        tracing::debug!(path = %self.path.display(), "saved card slot");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "cleared card slot");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_memory_store_loads_default() {
        let store = MemoryStore::new();
        assert!(store.try_load().unwrap().is_none());
        assert_eq!(store.load(), CardRecord::default());
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        let card = CardRecord::new("Chase", "10000", "2500", "15", "5", 25);
        store.save(&card).unwrap();
        assert_eq!(store.load(), card);
        assert!(store.raw().unwrap().contains("\"currentBalance\":\"2500\""));
    }

    #[test]
    fn test_clear_removes_slot() {
        let mut store = MemoryStore::new();
        store.save(&CardRecord::new("Chase", "1", "1", "1", "1", 30)).unwrap();
        store.clear().unwrap();
        assert!(store.raw().is_none());
        assert_eq!(store.load(), CardRecord::default());
    }

    #[test]
    fn test_corrupt_slot_falls_back_to_default() {
        let store = MemoryStore::with_raw("{not json");
        assert!(matches!(store.try_load(), Err(StoreError::Corrupt { .. })));
        assert_eq!(store.load(), CardRecord::default());

        let store = MemoryStore::with_raw(r#"{"utilTarget":"thirty"}"#);
        assert_eq!(store.load(), CardRecord::default());
    }

    #[test]
    fn test_file_store_path() {
        let store = JsonFileStore::in_dir("/tmp/cc");
        assert_eq!(store.path(), Path::new("/tmp/cc/creditcycle_card.json"));
    }
}
