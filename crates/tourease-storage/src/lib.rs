// Durable key-value storage behind a small port
// The favorites store only ever sees `KeyValueStore`, never the backend

pub mod error;
pub mod memory;
pub mod store;

#[cfg(not(target_arch = "wasm32"))]
pub mod sqlite;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod browser;

pub use error::{Result, StorageError};
pub use memory::MemoryStore;
pub use store::KeyValueStore;

#[cfg(not(target_arch = "wasm32"))]
pub use sqlite::SqliteStore;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use browser::BrowserStore;
