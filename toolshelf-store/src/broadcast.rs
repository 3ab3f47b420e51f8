//! Key-change broadcasting.
//!
//! The store only talks to [`KeyChangeBroadcaster`]. Two implementations
//! exist: an in-process channel for observers in the writing context, and
//! an adapter over the origin's storage-change events for other contexts.

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use toolshelf_storage::{Received, StorageArea, StorageEvents};
use toolshelf_types::ObserverId;
use tracing::trace;

/// A new value for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChange {
    pub key: String,
    /// Serialized JSON, or `None` when the key was removed.
    pub raw: Option<String>,
    /// The observer that wrote it, when written in this context.
    pub origin: Option<ObserverId>,
    /// Origin-wide sequence number of the write.
    pub seq: u64,
}

/// What an observer can be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Changed(KeyChange),
    /// Every key was removed.
    Cleared { seq: u64 },
    /// The feed fell behind and dropped `n` notifications.
    Lagged(u64),
}

impl Notification {
    /// Sequence number of the change, if this notification carries one.
    pub fn seq(&self) -> Option<u64> {
        match self {
            Self::Changed(change) => Some(change.seq),
            Self::Cleared { seq } => Some(*seq),
            Self::Lagged(_) => None,
        }
    }
}

/// A stream of notifications owned by one observer.
#[async_trait]
pub trait ChangeFeed: Send {
    /// Returns the next pending notification without waiting.
    fn try_next(&mut self) -> Option<Notification>;

    /// Waits for the next notification. `None` means the feed is closed.
    async fn next(&mut self) -> Option<Notification>;
}

/// Delivers key changes to observers.
pub trait KeyChangeBroadcaster: Send + Sync {
    /// Announces a change made in this context.
    fn publish(&self, notification: Notification);

    /// Opens a feed for a new observer.
    fn subscribe(&self) -> Box<dyn ChangeFeed>;
}

// ── Same context ─────────────────────────────────────────────────

/// In-process publish/subscribe for observers sharing one context.
pub struct SameContextBroadcaster {
    tx: broadcast::Sender<Notification>,
}

impl SameContextBroadcaster {
    /// Creates a broadcaster whose feeds buffer `capacity` notifications.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }
}

impl KeyChangeBroadcaster for SameContextBroadcaster {
    fn publish(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            trace!("no same-context observers to notify");
        }
    }

    fn subscribe(&self) -> Box<dyn ChangeFeed> {
        Box::new(SameContextFeed {
            rx: self.tx.subscribe(),
        })
    }
}

struct SameContextFeed {
    rx: broadcast::Receiver<Notification>,
}

#[async_trait]
impl ChangeFeed for SameContextFeed {
    fn try_next(&mut self) -> Option<Notification> {
        match self.rx.try_recv() {
            Ok(notification) => Some(notification),
            Err(TryRecvError::Lagged(n)) => Some(Notification::Lagged(n)),
            Err(TryRecvError::Empty | TryRecvError::Closed) => None,
        }
    }

    async fn next(&mut self) -> Option<Notification> {
        match self.rx.recv().await {
            Ok(notification) => Some(notification),
            Err(RecvError::Lagged(n)) => Some(Notification::Lagged(n)),
            Err(RecvError::Closed) => None,
        }
    }
}

// ── Other contexts ───────────────────────────────────────────────

/// Listens for storage changes made by other contexts of the origin.
///
/// Publishing is a no-op: the storage write itself is what other contexts
/// observe.
pub struct StorageEventBroadcaster {
    area: StorageArea,
}

impl StorageEventBroadcaster {
    pub fn new(area: StorageArea) -> Self {
        Self { area }
    }
}

impl KeyChangeBroadcaster for StorageEventBroadcaster {
    fn publish(&self, _notification: Notification) {}

    fn subscribe(&self) -> Box<dyn ChangeFeed> {
        Box::new(StorageEventFeed {
            events: self.area.subscribe(),
        })
    }
}

struct StorageEventFeed {
    events: StorageEvents,
}

impl StorageEventFeed {
    fn translate(received: Received) -> Notification {
        match received {
            Received::Event(event) => match event.key {
                Some(key) => Notification::Changed(KeyChange {
                    key,
                    raw: event.new_value,
                    origin: None,
                    seq: event.seq,
                }),
                None => Notification::Cleared { seq: event.seq },
            },
            Received::Lagged(n) => Notification::Lagged(n),
        }
    }
}

#[async_trait]
impl ChangeFeed for StorageEventFeed {
    fn try_next(&mut self) -> Option<Notification> {
        self.events.try_recv().map(Self::translate)
    }

    async fn next(&mut self) -> Option<Notification> {
        self.events.recv().await.map(Self::translate)
    }
}
