use crate::{KeyValueStore, Result, StorageError};
use std::collections::HashMap;

/// In-memory storage area
///
/// Nothing survives the process, which is exactly what tests want.
/// A quota can be set to mimic the browser's per-origin limit, and a
/// disabled store mimics private browsing modes that refuse storage outright.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Max total bytes (keys + values), `None` means unlimited
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys + values would exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Store where every operation fails with `Unavailable`
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Pre-populate a key, bypassing quota checks
    pub fn seed(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes currently used, counted the way the quota counts them
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_enabled(&self) -> Result<()> {
        if self.disabled {
            return Err(StorageError::Unavailable("storage is disabled".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.check_enabled()?;
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_enabled()?;

        if let Some(limit) = self.quota {
            // Replacing a key frees its old value first
            let current = self.entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let projected = self.used_bytes() - current + key.len() + value.len();
            if projected > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check_enabled()?;
        self.entries.remove(key);
        Ok(())
    }
}
