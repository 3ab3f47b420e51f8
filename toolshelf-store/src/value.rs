//! Observers of a single synced key.

use futures::future::select_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use toolshelf_types::ObserverId;
use tracing::{debug, warn};

use crate::broadcast::{ChangeFeed, KeyChange, Notification};
use crate::store::Shared;

/// A write: either a literal value or a function of the current one.
///
/// Functional updates read the observer's current in-memory value, so
/// several queued updates compose instead of overwriting each other.
pub enum Update<T> {
    Replace(T),
    Apply(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Update<T> {
    /// Wraps an updater function.
    pub fn with(f: impl FnOnce(&T) -> T + Send + 'static) -> Self {
        Self::Apply(Box::new(f))
    }

    fn resolve(self, current: &T) -> T {
        match self {
            Self::Replace(value) => value,
            Self::Apply(f) => f(current),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Self::Replace(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
            Self::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}

/// One observer's view of a persisted key.
///
/// The value is loaded when the observer is opened and kept current by
/// [`poll_changes`](Self::poll_changes) or [`changed`](Self::changed).
/// Notifications are applied in sequence order; one older than the last
/// change applied is stale and skipped, so the newest write wins no matter
/// which channel delivered it. Dropping the observer unsubscribes it.
pub struct SyncedValue<T> {
    id: ObserverId,
    key: String,
    initial: T,
    value: T,
    /// Sequence number of the newest change reflected in `value`.
    applied_seq: u64,
    feeds: Vec<Box<dyn ChangeFeed>>,
    shared: Arc<Shared>,
}

impl<T> SyncedValue<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub(crate) fn open(shared: Arc<Shared>, key: String, initial: T) -> Self {
        // Subscribe before loading so no write can slip between the two.
        let feeds = shared
            .broadcasters
            .iter()
            .map(|broadcaster| broadcaster.subscribe())
            .collect();
        let value = shared.load(&key).unwrap_or_else(|| initial.clone());
        shared.registry.register(&key);
        Self {
            id: ObserverId::new(),
            key,
            initial,
            value,
            applied_seq: 0,
            feeds,
            shared,
        }
    }

    /// Returns the current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns the key this observer follows.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value used when nothing usable is persisted.
    pub fn initial(&self) -> &T {
        &self.initial
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Writes a new value.
    ///
    /// The value is persisted, announced to the other observers, and
    /// becomes this observer's value before returning. Persistence failures
    /// are logged; the in-memory value is updated regardless.
    pub fn write(&mut self, update: impl Into<Update<T>>) {
        let next = update.into().resolve(&self.value);
        self.commit(next);
    }

    /// Writes a literal value.
    pub fn set(&mut self, value: T) {
        self.commit(value);
    }

    /// Writes the result of `f` applied to the current value.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.value);
        self.commit(next);
    }

    /// Deletes the persisted key and resets every observer of it to its
    /// initial value.
    pub fn remove(&mut self) {
        self.shared.forget(&self.key);
        let seq = self.shared.next_seq();
        self.shared.publish(Notification::Changed(KeyChange {
            key: self.key.clone(),
            raw: None,
            origin: Some(self.id),
            seq,
        }));
        self.applied_seq = seq;
        self.value = self.initial.clone();
    }

    /// Re-reads the persisted value, falling back to the initial value.
    ///
    /// Does nothing on a detached store, which has nothing to re-read.
    pub fn reload(&mut self) {
        if self.shared.storage.is_none() {
            return;
        }
        // Everything numbered so far has already reached storage.
        self.applied_seq = self.shared.last_seq();
        self.value = self
            .shared
            .load(&self.key)
            .unwrap_or_else(|| self.initial.clone());
    }

    /// Applies every pending notification without waiting.
    ///
    /// Returns true if any of them concerned this observer's key.
    pub fn poll_changes(&mut self) -> bool {
        let mut pending = Vec::new();
        for feed in &mut self.feeds {
            while let Some(notification) = feed.try_next() {
                pending.push(notification);
            }
        }
        // Feeds are drained one after another; restore write order.
        pending.sort_by_key(|notification| notification.seq().unwrap_or(0));
        let mut changed = false;
        for notification in pending {
            changed |= self.apply(notification);
        }
        changed
    }

    /// Waits until a notification concerning this key has been applied.
    ///
    /// Returns false once every feed has closed.
    pub async fn changed(&mut self) -> bool {
        loop {
            if self.feeds.is_empty() {
                return false;
            }
            let (notification, index, _) =
                select_all(self.feeds.iter_mut().map(|feed| feed.next())).await;
            match notification {
                Some(notification) => {
                    if self.apply(notification) {
                        return true;
                    }
                }
                None => {
                    self.feeds.remove(index);
                }
            }
        }
    }

    fn commit(&mut self, next: T) {
        if let Some(raw) = self.shared.persist(&self.key, &next) {
            let seq = self.shared.next_seq();
            self.shared.publish(Notification::Changed(KeyChange {
                key: self.key.clone(),
                raw: Some(raw),
                origin: Some(self.id),
                seq,
            }));
            self.applied_seq = seq;
        }
        self.value = next;
    }

    fn apply(&mut self, notification: Notification) -> bool {
        match notification {
            Notification::Changed(change) => {
                if change.key != self.key || change.seq <= self.applied_seq {
                    return false;
                }
                self.applied_seq = change.seq;
                if change.origin == Some(self.id) {
                    return false;
                }
                match change.raw {
                    None => self.value = self.initial.clone(),
                    Some(raw) => match serde_json::from_str(&raw) {
                        Ok(value) => self.value = value,
                        Err(e) => {
                            warn!("Ignoring unparsable update for {:?}: {}", self.key, e);
                            return false;
                        }
                    },
                }
                true
            }
            Notification::Cleared { seq } => {
                if seq <= self.applied_seq {
                    return false;
                }
                self.applied_seq = seq;
                self.value = self.initial.clone();
                true
            }
            Notification::Lagged(missed) => {
                debug!(
                    "observer of {:?} missed {} notifications, reloading",
                    self.key, missed
                );
                self.reload();
                true
            }
        }
    }
}

impl<T> Drop for SyncedValue<T> {
    fn drop(&mut self) {
        self.shared.registry.unregister(&self.key);
    }
}

impl<T: fmt::Debug> fmt::Debug for SyncedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncedValue")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
