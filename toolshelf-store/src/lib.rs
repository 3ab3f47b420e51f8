//! Persisted values kept consistent across observers and contexts.
//!
//! A [`SyncedLocalStore`] hands out [`SyncedValue`] observers, one per UI
//! element interested in a key. Every observer:
//! - loads the persisted JSON under its key when opened, falling back to its
//!   initial value when nothing (or nothing parsable) is stored;
//! - persists its writes and announces them to the other observers;
//! - picks up writes made by other observers in the same context and by
//!   other contexts of the same origin.
//!
//! # Propagation
//!
//! Storage-change events never reach the context that made the change, so
//! two [`KeyChangeBroadcaster`]s are stacked: [`SameContextBroadcaster`] for
//! observers in the writing context and [`StorageEventBroadcaster`] for
//! everyone else. Conflicts resolve as last write wins.
//!
//! # Failure
//!
//! Nothing here fails toward the caller. Unavailable storage, corrupt
//! payloads and rejected writes are logged and the in-memory value carries
//! on.
//!
//! # Example
//!
//! ```
//! use toolshelf_storage::Origin;
//! use toolshelf_store::SyncedLocalStore;
//!
//! let store = SyncedLocalStore::new(Origin::in_memory().open_context());
//! let mut favorites = store.observe("favorites", Vec::<String>::new());
//! favorites.set(vec!["json-formatter".to_string()]);
//! assert_eq!(store.read("favorites", Vec::<String>::new()), vec!["json-formatter"]);
//! ```

pub mod broadcast;
mod registry;
mod store;
mod value;

pub use broadcast::{
    ChangeFeed, KeyChange, KeyChangeBroadcaster, Notification, SameContextBroadcaster,
    StorageEventBroadcaster,
};
pub use registry::ObserverRegistry;
pub use store::SyncedLocalStore;
pub use value::{SyncedValue, Update};
