use crate::Result;

/// A string-to-string storage area, shaped like the browser's `localStorage`
///
/// Backends decide what "durable" means. Callers only get three operations,
/// which keeps the in-memory store good enough for tests and the SQLite store
/// good enough for the CLI.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if nothing is stored there
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing whatever was there
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
