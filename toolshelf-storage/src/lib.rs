//! Durable storage layer for Toolshelf.
//!
//! Models the browser's per-origin persistent key-value store: string keys,
//! string (JSON) values, synchronous access, an optional byte quota.
//!
//! # Architecture
//!
//! - [`DurableStorage`] is the backend seam. [`MemoryStorage`] backs tests
//!   and detached contexts, [`SqliteStorage`] persists to a file.
//! - An [`Origin`] owns one backend plus a storage-change channel. Every
//!   open context gets a [`StorageArea`]; mutations made through one area
//!   are announced to every *other* area as a [`StorageEvent`], never to
//!   the writer itself.

mod error;
mod memory;
mod origin;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStorage;
pub use origin::{
    DEFAULT_EVENT_CAPACITY, Origin, Received, StorageArea, StorageEvent, StorageEvents,
};
pub use sqlite::SqliteStorage;

/// A synchronous string key-value store.
///
/// Implementations must be safe to share between contexts of one origin.
pub trait DurableStorage: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Removes every key.
    fn clear(&self) -> StorageResult<()>;

    /// Returns every stored key, sorted.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Bytes an entry counts against a quota.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
