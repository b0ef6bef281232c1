//! `window.localStorage` backend for the wasm build.

use crate::{KeyValueStore, Result, StorageError};
use web_sys::Storage;

/// The browser's per-origin storage area
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    /// Grab `localStorage` from the current window
    ///
    /// Fails with `Unavailable` outside a window context or when the browser
    /// refuses storage (some private modes do).
    pub fn local() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        // The browser doesn't tell us its quota, so a QuotaExceededError
        // lands here as Unavailable with the DOMException text
        self.storage.set_item(key, value).map_err(|e| {
            tracing::debug!("localStorage.setItem({}) failed: {:?}", key, e);
            StorageError::Unavailable(format!("setItem({}) failed: {:?}", key, e))
        })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}
