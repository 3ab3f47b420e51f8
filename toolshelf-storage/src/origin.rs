//! Per-origin storage areas and storage-change events.
//!
//! All contexts of one origin share a backend. A mutation made through one
//! context's [`StorageArea`] is announced to every other context; the
//! writing context never hears about its own writes on this channel.
//!
//! Every event carries a sequence number drawn from a counter shared by the
//! whole origin, so changes arriving on different channels can be put back
//! in the order they were made.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use toolshelf_types::ContextId;
use tracing::debug;

use crate::{DurableStorage, MemoryStorage, StorageResult};

/// Default number of undelivered events buffered per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// A change to an origin's durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed, or `None` when the whole area was cleared.
    pub key: Option<String>,
    /// Value before the change.
    pub old_value: Option<String>,
    /// Value after the change; `None` when the key was removed.
    pub new_value: Option<String>,
    /// Context that made the change.
    pub source: ContextId,
    /// Position of the change in the origin's history.
    pub seq: u64,
}

/// One origin: a shared backend plus its change channel.
#[derive(Clone)]
pub struct Origin {
    backend: Arc<dyn DurableStorage>,
    events: broadcast::Sender<StorageEvent>,
    sequence: Arc<AtomicU64>,
}

impl Origin {
    /// Creates an origin over `backend`.
    pub fn new(backend: Arc<dyn DurableStorage>) -> Self {
        Self::with_event_capacity(backend, DEFAULT_EVENT_CAPACITY)
    }

    /// Creates an origin whose subscribers buffer `capacity` events.
    pub fn with_event_capacity(backend: Arc<dyn DurableStorage>, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            backend,
            events,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates an origin backed by a fresh [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Opens a new context (tab) on this origin.
    pub fn open_context(&self) -> StorageArea {
        StorageArea {
            context: ContextId::new(),
            backend: Arc::clone(&self.backend),
            events: self.events.clone(),
            sequence: Arc::clone(&self.sequence),
        }
    }

    /// Returns the shared backend.
    pub fn backend(&self) -> &Arc<dyn DurableStorage> {
        &self.backend
    }
}

/// One context's view of its origin's durable storage.
///
/// Reads and writes go straight to the shared backend. Successful
/// mutations that change something emit a [`StorageEvent`] tagged with
/// this area's context.
#[derive(Clone)]
pub struct StorageArea {
    context: ContextId,
    backend: Arc<dyn DurableStorage>,
    events: broadcast::Sender<StorageEvent>,
    sequence: Arc<AtomicU64>,
}

impl StorageArea {
    /// Returns the context this area belongs to.
    pub fn context_id(&self) -> ContextId {
        self.context
    }

    /// Allocates the next origin-wide sequence number.
    ///
    /// Numbers start at 1 and strictly increase across every context of the
    /// origin.
    pub fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently allocated sequence number, or 0 if none was.
    pub fn last_seq(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Returns the raw value stored under `key`.
    pub fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.backend.get_item(key)
    }

    /// Stores `value` under `key`.
    ///
    /// Writing the value already stored does not emit an event.
    pub fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let old_value = self.backend.get_item(key)?;
        self.backend.set_item(key, value)?;
        if old_value.as_deref() != Some(value) {
            self.emit(Some(key.to_string()), old_value, Some(value.to_string()));
        }
        Ok(())
    }

    /// Removes `key`. Emits an event only if the key existed.
    pub fn remove_item(&self, key: &str) -> StorageResult<()> {
        let old_value = self.backend.get_item(key)?;
        self.backend.remove_item(key)?;
        if old_value.is_some() {
            self.emit(Some(key.to_string()), old_value, None);
        }
        Ok(())
    }

    /// Removes every key. Emits a single keyless event if anything was stored.
    pub fn clear(&self) -> StorageResult<()> {
        let had_entries = !self.backend.keys()?.is_empty();
        self.backend.clear()?;
        if had_entries {
            self.emit(None, None, None);
        }
        Ok(())
    }

    /// Returns every stored key, sorted.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        self.backend.keys()
    }

    /// Subscribes to changes made by other contexts of the same origin.
    pub fn subscribe(&self) -> StorageEvents {
        StorageEvents {
            context: self.context,
            rx: self.events.subscribe(),
        }
    }

    fn emit(&self, key: Option<String>, old_value: Option<String>, new_value: Option<String>) {
        let event = StorageEvent {
            key,
            old_value,
            new_value,
            source: self.context,
            seq: self.next_seq(),
        };
        // No receivers is fine: nobody else has the origin open.
        if self.events.send(event).is_err() {
            debug!("storage event dropped, no open contexts are listening");
        }
    }
}

/// What a [`StorageEvents`] subscription yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// A change made by another context.
    Event(StorageEvent),
    /// The subscriber fell behind and `n` events were discarded.
    Lagged(u64),
}

/// Storage-change subscription for one context.
///
/// Events whose source is the subscribing context are filtered out.
pub struct StorageEvents {
    context: ContextId,
    rx: broadcast::Receiver<StorageEvent>,
}

impl StorageEvents {
    /// Returns the next pending delivery without waiting.
    ///
    /// Returns `None` when nothing is pending or the origin is gone.
    pub fn try_recv(&mut self) -> Option<Received> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if event.source == self.context => continue,
                Ok(event) => return Some(Received::Event(event)),
                Err(TryRecvError::Lagged(n)) => return Some(Received::Lagged(n)),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Waits for the next delivery. Returns `None` once the origin is gone.
    pub async fn recv(&mut self) -> Option<Received> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.source == self.context => continue,
                Ok(event) => return Some(Received::Event(event)),
                Err(RecvError::Lagged(n)) => return Some(Received::Lagged(n)),
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
