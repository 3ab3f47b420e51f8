//! Favorites and saved tools: persisted lists of tool ids.

use serde::{Deserialize, Serialize};
use toolshelf_store::{SyncedLocalStore, SyncedValue};
use toolshelf_types::{keys, ToolId};

fn toggled(ids: &[ToolId], id: &ToolId) -> Vec<ToolId> {
    if ids.contains(id) {
        without(ids, id)
    } else {
        with(ids, id)
    }
}

fn with(ids: &[ToolId], id: &ToolId) -> Vec<ToolId> {
    let mut next = ids.to_vec();
    if !next.contains(id) {
        next.push(id.clone());
    }
    next
}

fn without(ids: &[ToolId], id: &ToolId) -> Vec<ToolId> {
    ids.iter().filter(|other| *other != id).cloned().collect()
}

/// Tools the user starred, in the order they were starred.
pub struct Favorites {
    ids: SyncedValue<Vec<ToolId>>,
}

impl Favorites {
    pub fn open(store: &SyncedLocalStore) -> Self {
        Self {
            ids: store.observe(keys::FAVORITES, Vec::new()),
        }
    }

    pub fn ids(&self) -> &[ToolId] {
        self.ids.get()
    }

    pub fn contains(&self, id: &ToolId) -> bool {
        self.ids.get().contains(id)
    }

    /// Flips `id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &ToolId) -> bool {
        self.ids.update(|ids| toggled(ids, id));
        self.contains(id)
    }

    pub fn remove(&mut self, id: &ToolId) {
        self.ids.update(|ids| without(ids, id));
    }

    /// Applies pending notifications; true if the list changed.
    pub fn refresh(&mut self) -> bool {
        self.ids.poll_changes()
    }
}

/// The wrapper the state-store collaborator persists its slices in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistEnvelope<S> {
    pub state: S,
    #[serde(default)]
    pub version: u32,
}

/// The persisted slice behind [`SavedTools`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedToolsState {
    #[serde(default)]
    pub saved_tools: Vec<ToolId>,
}

/// Tools the user saved for later.
pub struct SavedTools {
    envelope: SyncedValue<PersistEnvelope<SavedToolsState>>,
}

impl SavedTools {
    pub fn open(store: &SyncedLocalStore) -> Self {
        Self {
            envelope: store.observe(keys::SAVED_TOOLS, PersistEnvelope::default()),
        }
    }

    pub fn ids(&self) -> &[ToolId] {
        &self.envelope.get().state.saved_tools
    }

    pub fn contains(&self, id: &ToolId) -> bool {
        self.ids().contains(id)
    }

    /// Flips `id` and returns whether it is now saved.
    pub fn toggle(&mut self, id: &ToolId) -> bool {
        self.edit(|ids| toggled(ids, id));
        self.contains(id)
    }

    pub fn remove(&mut self, id: &ToolId) {
        self.edit(|ids| without(ids, id));
    }

    pub fn refresh(&mut self) -> bool {
        self.envelope.poll_changes()
    }

    fn edit(&mut self, f: impl FnOnce(&[ToolId]) -> Vec<ToolId>) {
        self.envelope.update(|envelope| PersistEnvelope {
            state: SavedToolsState {
                saved_tools: f(&envelope.state.saved_tools),
            },
            version: envelope.version,
        });
    }
}
