use gloo_storage::{Storage as _, errors::StorageError as GlooStorageError};
use serde::{Serialize, de::DeserializeOwned};
use soma_domain::StorageError;

use crate::Backend;

/// Browser `localStorage`.
pub struct LocalStorage;

impl LocalStorage {
    #[must_use]
    pub fn is_available() -> bool {
        web_sys::window().is_some_and(|window| matches!(window.local_storage(), Ok(Some(_))))
    }
}

impl Backend for LocalStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        if !Self::is_available() {
            return Err(StorageError::Unavailable);
        }
        match gloo_storage::LocalStorage::get(key) {
            Ok(value) => Ok(Some(value)),
            Err(GlooStorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(storage_error(err)),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        if !Self::is_available() {
            return Err(StorageError::Unavailable);
        }
        gloo_storage::LocalStorage::set(key, value).map_err(storage_error)
    }
}

fn storage_error(err: GlooStorageError) -> StorageError {
    match err {
        GlooStorageError::SerdeError(err) => StorageError::Corrupt(err.to_string()),
        err => StorageError::Other(Box::new(err)),
    }
}
