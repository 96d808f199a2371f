//! Browser `localStorage` backend.

use super::{KeyValueStorage, StorageError};

/// Stateless handle; the `Storage` object is looked up on each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        for (index, (key, value)) in entries.iter().enumerate() {
            if let Err(e) = storage.set_item(key, value) {
                // Quota errors can hit mid-way; undo what already landed.
                for (written, _) in &entries[..index] {
                    storage.remove_item(written).ok();
                }
                return Err(StorageError::Unavailable(format!("{e:?}")));
            }
        }
        Ok(())
    }

    fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        for key in keys {
            storage
                .remove_item(key)
                .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?;
        }
        Ok(())
    }
}
