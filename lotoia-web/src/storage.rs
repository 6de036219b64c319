//! Browser `localStorage`/`sessionStorage` behind the core [`KeyValueStore`].
use lotoia_core::SessionId;
use lotoia_core::storage::{KeyValueStore, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStore {
    Local,
    Session,
}

impl BrowserStore {
    #[cfg(target_arch = "wasm32")]
    fn handle(self) -> Result<web_sys::Storage, StorageError> {
        let win = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = match self {
            Self::Local => win.local_storage(),
            Self::Session => win.session_storage(),
        };
        storage.ok().flatten().ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.handle()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.handle()?
            .set_item(key, value)
            .map_err(|_| StorageError::Quota)
    }

    fn remove(&self, key: &str) {
        if let Ok(storage) = self.handle() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Server rendering and host tests have no storage at all.
#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for BrowserStore {
    fn get_raw(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_raw(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) {}
}

/// Raw string helpers for preferences stored without JSON encoding.
#[must_use]
pub fn get_pref(key: &str) -> Option<String> {
    BrowserStore::Local.get_raw(key).ok().flatten()
}

pub fn set_pref(key: &str, value: &str) {
    if let Err(err) = BrowserStore::Local.set_raw(key, value) {
        log::debug!("could not persist {key}: {err}");
    }
}

/// This tab's session id, minted on first use.
#[must_use]
pub fn session_id() -> SessionId {
    SessionId::load_or_create(&BrowserStore::Session, crate::dom::entropy_seed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotoia_core::storage::{load_json, save_json};

    #[test]
    fn host_storage_is_unavailable_and_swallowed() {
        assert!(!save_json(&BrowserStore::Local, "k", &1));
        assert_eq!(load_json::<i32, _>(&BrowserStore::Session, "k"), None);
        assert_eq!(get_pref("lotoia.theme"), None);
        set_pref("lotoia.theme", "dark");
    }

    #[test]
    fn session_id_is_minted_without_storage() {
        assert!(session_id().as_str().starts_with("sess_"));
    }
}
