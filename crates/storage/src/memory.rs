use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use serde::{Serialize, de::DeserializeOwned};
use soma_domain::StorageError;

use crate::Backend;

/// In-memory backend for hosts without persistent storage.
///
/// Values are kept as serialized JSON, so decoding behaves as with a
/// persistent backend. Faults can be simulated by making the storage
/// unavailable or read-only.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    unavailable: AtomicBool,
    read_only: AtomicBool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw document without any validation.
    pub fn insert_raw(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.into());
        }
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::Relaxed);
    }

    fn entries(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable);
        }
        self.entries.lock().map_err(|_| StorageError::Unavailable)
    }
}

impl Backend for MemoryStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        self.entries()?
            .get(key)
            .map(|value| {
                serde_json::from_str(value).map_err(|err| StorageError::Corrupt(err.to_string()))
            })
            .transpose()
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let mut entries = self.entries()?;
        if self.read_only.load(Ordering::Relaxed) {
            return Err(StorageError::Other("storage is read-only".into()));
        }
        let value =
            serde_json::to_string(value).map_err(|err| StorageError::Other(Box::new(err)))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
