//! Best-effort persistence adapter
//!
//! Widgets never see a storage failure: loads fall back to a default and
//! saves are logged and dropped.

use std::sync::Arc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::store::{KeyValueStore, StorageError};

/// Typed load/save on top of a [`KeyValueStore`]
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Return the value stored under `key`, or `default` when it is absent
    /// or does not parse as `T`
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No stored value for '{}', using default", key);
                default
            }
            Err(e) => {
                debug!("Discarding stored value for '{}': {}", key, e);
                default
            }
        }
    }

    /// Store `value` under `key`; failures are logged and swallowed
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            warn!("Failed to persist '{}': {}", key, e);
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set_item(key, raw)
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}
