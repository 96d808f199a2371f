//! Key-value persistence behind the session store.
//!
//! The session store only needs three things from a backend: read one key, write several
//! keys so they land together, and remove several keys together. Backends:
//!
//! - [`MemoryStorage`]: process-local map, used by tests and throwaway sessions.
//! - [`FileStorage`]: one JSON object file under the platform config directory (native).
//! - [`LocalStorage`]: the browser's `localStorage` (wasm32).

use std::sync::PoisonError;

use thiserror::Error;

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage holds invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(_poisoned: PoisonError<T>) -> Self {
        log::error!("storage lock poisoned by a panicking writer");
        Self::Poisoned
    }
}

/// A string-to-string store.
///
/// `set_entries` and `remove_entries` must apply all keys or none.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError>;
}
