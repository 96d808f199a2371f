use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStorage, StorageError};

/// In-process storage. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock()?;
        Ok(entries.get(key).cloned())
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = self.entries.lock()?;
        for (key, value) in entries {
            map.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = self.entries.lock()?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        storage
            .set_entries(&[("a", "1"), ("b", "2")])
            .expect("set should succeed");

        assert_eq!(storage.get("a").expect("get"), Some("1".to_owned()));
        assert_eq!(storage.len(), 2);

        storage.remove_entries(&["a", "b"]).expect("remove should succeed");
        assert_eq!(storage.get("a").expect("get"), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn removing_missing_keys_is_fine() {
        let storage = MemoryStorage::new();
        assert!(storage.remove_entries(&["nope"]).is_ok());
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let storage = MemoryStorage::new();
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _held = storage.entries.lock();
            panic!("writer died");
        }));

        assert!(matches!(storage.get("a"), Err(StorageError::Poisoned)));
        assert!(matches!(
            storage.set_entries(&[("a", "1")]),
            Err(StorageError::Poisoned)
        ));
    }
}
