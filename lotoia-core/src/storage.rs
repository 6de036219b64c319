//! Key/value persistence abstraction over browser storage.
//!
//! Every persisted value is optional bookkeeping. Callers go through
//! [`load_json`]/[`save_json`], which log and swallow failures so a disabled
//! or full storage never interrupts the page.
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage quota exceeded")]
    Quota,
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// String-valued store such as `localStorage` or `sessionStorage`.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

/// Read and decode `key`; absent, unreadable and malformed values are `None`.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get_raw(key) {
        Ok(raw) => raw?,
        Err(err) => {
            log::debug!("read of {key} failed: {err}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("discarding malformed {key}: {err}");
            None
        }
    }
}

/// Encode and write `value`; returns whether the write landed.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|raw| store.set_raw(key, &raw));
    if let Err(err) = &result {
        log::debug!("write of {key} failed: {err}");
    }
    result.is_ok()
}

/// In-memory store used by tests and the tester harness. Clones share data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes fail with [`StorageError::Quota`].
    #[must_use]
    pub fn full() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Quota);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip_through_shared_clone() {
        let store = MemoryStore::new();
        let view = store.clone();
        assert!(save_json(&store, "k", &vec![1_u8, 2, 3]));
        assert_eq!(load_json::<Vec<u8>, _>(&view, "k"), Some(vec![1, 2, 3]));
        store.remove("k");
        assert!(view.is_empty());
    }

    #[test]
    fn malformed_and_missing_values_are_none() {
        let store = MemoryStore::new();
        store.set_raw("k", "{not json").unwrap();
        assert_eq!(load_json::<Vec<u8>, _>(&store, "k"), None);
        assert_eq!(load_json::<Vec<u8>, _>(&store, "missing"), None);
    }

    #[test]
    fn quota_failure_is_swallowed() {
        let store = MemoryStore::full();
        assert!(!save_json(&store, "k", "value"));
        assert_eq!(store.set_raw("k", "v"), Err(StorageError::Quota));
        assert_eq!(store.len(), 0);
    }
}
