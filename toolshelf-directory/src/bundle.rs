//! The bundle launcher: a handful of tools opened side by side.

use toolshelf_store::{SyncedLocalStore, SyncedValue};
use toolshelf_types::{keys, Tool, ToolId};

use crate::error::{DirectoryError, DirectoryResult};

/// The tools selected for the multi-pane launcher, in pane order.
pub struct Bundle {
    ids: SyncedValue<Vec<ToolId>>,
    limit: usize,
}

impl Bundle {
    pub fn open(store: &SyncedLocalStore, limit: usize) -> Self {
        Self {
            ids: store.observe(keys::TOOL_BUNDLE, Vec::new()),
            limit,
        }
    }

    pub fn ids(&self) -> &[ToolId] {
        self.ids.get()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn contains(&self, id: &ToolId) -> bool {
        self.ids.get().contains(id)
    }

    /// Appends `id` as a new pane. Adding a tool already in the bundle is a
    /// no-op.
    pub fn add(&mut self, id: &ToolId, known: &[Tool]) -> DirectoryResult<()> {
        if !known.iter().any(|tool| &tool.id == id) {
            return Err(DirectoryError::UnknownTool(id.clone()));
        }
        if self.contains(id) {
            return Ok(());
        }
        if self.ids.get().len() >= self.limit {
            return Err(DirectoryError::BundleFull { limit: self.limit });
        }
        self.ids.update(|ids| {
            let mut next = ids.clone();
            next.push(id.clone());
            next
        });
        Ok(())
    }

    /// Removes `id`; false if it was not in the bundle.
    pub fn remove(&mut self, id: &ToolId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.ids
            .update(|ids| ids.iter().filter(|other| *other != id).cloned().collect());
        true
    }

    pub fn clear(&mut self) {
        self.ids.set(Vec::new());
    }

    /// Resolves the bundle against `known`, skipping ids that no longer
    /// exist.
    pub fn panes<'a>(&self, known: &'a [Tool]) -> Vec<&'a Tool> {
        self.ids
            .get()
            .iter()
            .filter_map(|id| known.iter().find(|tool| &tool.id == id))
            .collect()
    }

    pub fn refresh(&mut self) -> bool {
        self.ids.poll_changes()
    }
}
