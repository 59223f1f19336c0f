#![warn(clippy::pedantic)]

use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use soma_domain::StorageError;

mod history;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
mod settings;


pub use history::{Exercise, Session, SessionError, Set};

pub const KEY_HISTORY: &str = "soma_history_v2";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_LOG: &str = "log";

/// Key-value storage holding JSON documents.
pub trait Backend {
    /// Read the value stored under `key`. A missing key is not an error.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>;
}

/// Access to a backend that never fails.
///
/// Faults of the backend are logged and reported as missing values or
/// unsuccessful writes. There are no retries.
pub struct Store<B> {
    backend: B,
}

impl<B> Store<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend> Store<B> {
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to read {key}: {err}");
                None
            }
        }
    }

    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!("failed to write {key}: {err}");
                false
            }
        }
    }
}
