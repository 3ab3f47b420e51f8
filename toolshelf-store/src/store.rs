//! The store: shared plumbing for every observer in one context.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use toolshelf_storage::{DEFAULT_EVENT_CAPACITY, StorageArea};
use toolshelf_types::ContextId;
use tracing::{debug, warn};

use crate::broadcast::{
    KeyChangeBroadcaster, Notification, SameContextBroadcaster, StorageEventBroadcaster,
};
use crate::registry::ObserverRegistry;
use crate::value::SyncedValue;

/// State shared by a store and all of its observers.
pub(crate) struct Shared {
    pub(crate) storage: Option<StorageArea>,
    pub(crate) broadcasters: Vec<Arc<dyn KeyChangeBroadcaster>>,
    pub(crate) registry: ObserverRegistry,
    /// Sequence numbers for a detached store; attached stores use the
    /// origin's counter.
    local_seq: AtomicU64,
}

impl Shared {
    /// Allocates a sequence number for a change made in this context.
    pub(crate) fn next_seq(&self) -> u64 {
        match &self.storage {
            Some(area) => area.next_seq(),
            None => self.local_seq.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// The newest sequence number handed out so far.
    pub(crate) fn last_seq(&self) -> u64 {
        match &self.storage {
            Some(area) => area.last_seq(),
            None => self.local_seq.load(Ordering::SeqCst),
        }
    }

    /// Loads and parses the persisted value under `key`.
    ///
    /// Missing storage, a missing key, a backend error and a corrupt payload
    /// all yield `None`; the last two are logged.
    pub(crate) fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let storage = self.storage.as_ref()?;
        let raw = match storage.get_item(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read {:?} from durable storage: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring unparsable value stored under {:?}: {}", key, e);
                None
            }
        }
    }

    /// Serializes and persists `value` under `key`.
    ///
    /// Returns the serialized form when serialization succeeded, whether or
    /// not the backend accepted the write.
    pub(crate) fn persist<T: Serialize>(&self, key: &str, value: &T) -> Option<String> {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize value for {:?}: {}", key, e);
                return None;
            }
        };
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, &raw) {
                warn!("Failed to persist {:?}: {}", key, e);
            }
        }
        Some(raw)
    }

    /// Removes `key` from durable storage.
    pub(crate) fn forget(&self, key: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove_item(key) {
                warn!("Failed to remove {:?} from durable storage: {}", key, e);
            }
        }
    }

    pub(crate) fn publish(&self, notification: Notification) {
        for broadcaster in &self.broadcasters {
            broadcaster.publish(notification.clone());
        }
    }
}

/// Hands out [`SyncedValue`] observers for one context.
///
/// Open exactly one store per context: observers only hear same-context
/// writes made through the store that opened them.
#[derive(Clone)]
pub struct SyncedLocalStore {
    shared: Arc<Shared>,
}

impl SyncedLocalStore {
    /// Creates a store over a context's storage area.
    pub fn new(area: StorageArea) -> Self {
        Self::with_capacity(area, DEFAULT_EVENT_CAPACITY)
    }

    /// Creates a store whose same-context feeds buffer `capacity`
    /// notifications.
    pub fn with_capacity(area: StorageArea, capacity: usize) -> Self {
        let broadcasters: Vec<Arc<dyn KeyChangeBroadcaster>> = vec![
            Arc::new(SameContextBroadcaster::new(capacity)),
            Arc::new(StorageEventBroadcaster::new(area.clone())),
        ];
        Self::with_broadcasters(Some(area), broadcasters)
    }

    /// Creates a store with no durable storage, as used when rendering
    /// outside a browsing context.
    ///
    /// Reads always yield the initial value; observers still see each
    /// other's writes.
    pub fn detached() -> Self {
        Self::with_broadcasters(
            None,
            vec![Arc::new(SameContextBroadcaster::new(DEFAULT_EVENT_CAPACITY))],
        )
    }

    /// Creates a store from explicit parts.
    pub fn with_broadcasters(
        storage: Option<StorageArea>,
        broadcasters: Vec<Arc<dyn KeyChangeBroadcaster>>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                storage,
                broadcasters,
                registry: ObserverRegistry::new(),
                local_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Returns true if this store has no durable storage.
    pub fn is_detached(&self) -> bool {
        self.shared.storage.is_none()
    }

    /// Returns the context this store belongs to, if attached.
    pub fn context_id(&self) -> Option<ContextId> {
        self.shared.storage.as_ref().map(StorageArea::context_id)
    }

    /// Reads the current persisted value of `key`, or `initial`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, initial: T) -> T {
        self.shared.load(key).unwrap_or(initial)
    }

    /// Opens an observer of `key`.
    pub fn observe<T>(&self, key: impl Into<String>, initial: T) -> SyncedValue<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        SyncedValue::open(Arc::clone(&self.shared), key.into(), initial)
    }

    /// Number of live observers of `key`.
    pub fn observer_count(&self, key: &str) -> usize {
        self.shared.registry.count(key)
    }

    /// Keys with at least one live observer.
    pub fn observed_keys(&self) -> Vec<String> {
        self.shared.registry.observed_keys()
    }

    /// Removes every persisted key and resets all observers to their
    /// initial values.
    pub fn clear(&self) {
        if let Some(storage) = &self.shared.storage {
            if let Err(e) = storage.clear() {
                warn!("Failed to clear durable storage: {}", e);
            }
        }
        debug!("cleared synced store");
        let seq = self.shared.next_seq();
        self.shared.publish(Notification::Cleared { seq });
    }
}
