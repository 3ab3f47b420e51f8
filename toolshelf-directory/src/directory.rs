//! The composition root.

use toolshelf_search::{DebouncedSearch, SearchResults};
use toolshelf_storage::StorageArea;
use toolshelf_store::SyncedLocalStore;
use toolshelf_types::{Tool, ToolId};
use tracing::{debug, info};

use crate::bundle::Bundle;
use crate::catalog::{categories, Catalog, CategoryCount};
use crate::config::DirectoryConfig;
use crate::custom::{CustomTools, ToolDraft};
use crate::error::{DirectoryError, DirectoryResult};
use crate::lists::{Favorites, SavedTools};
use crate::preferences::Preferences;

/// Narrows the catalogue after search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    /// Only tools in this category (exact match).
    pub category: Option<String>,
    /// Only tools the user starred.
    pub favorites_only: bool,
}

/// Owns every piece of directory state for one context.
///
/// Candidate tools are the catalogue followed by the user's custom tools.
/// Whenever that list changes the search cache is invalidated.
pub struct ToolDirectory {
    config: DirectoryConfig,
    store: SyncedLocalStore,
    catalog: Catalog,
    candidates: Vec<Tool>,
    search: DebouncedSearch<Tool>,
    favorites: Favorites,
    saved: SavedTools,
    custom: CustomTools,
    bundle: Bundle,
    preferences: Preferences,
}

impl ToolDirectory {
    /// Validates `config`, opens the context's store on `area` and every
    /// observer the directory needs.
    pub fn init(
        config: DirectoryConfig,
        area: StorageArea,
        catalog: Catalog,
    ) -> DirectoryResult<Self> {
        config.validate()?;
        let store = SyncedLocalStore::with_capacity(area, config.notification_capacity);
        let custom = CustomTools::open(&store);
        let mut directory = Self {
            search: DebouncedSearch::new(config.search_debounce(), config.search_cache_capacity),
            favorites: Favorites::open(&store),
            saved: SavedTools::open(&store),
            bundle: Bundle::open(&store, config.bundle_limit),
            preferences: Preferences::open(&store),
            custom,
            candidates: Vec::new(),
            catalog,
            store,
            config,
        };
        directory.rebuild_candidates();
        info!(
            "Tool directory ready: {} catalogue tools, {} custom, {} favorites",
            directory.catalog.len(),
            directory.custom.tools().len(),
            directory.favorites.ids().len()
        );
        Ok(directory)
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn store(&self) -> &SyncedLocalStore {
        &self.store
    }

    // ── Catalogue ────────────────────────────────────────────────

    /// Catalogue tools followed by custom tools.
    pub fn tools(&self) -> &[Tool] {
        &self.candidates
    }

    pub fn tool(&self, id: &ToolId) -> Option<&Tool> {
        self.candidates.iter().find(|tool| &tool.id == id)
    }

    pub fn categories(&self) -> Vec<CategoryCount> {
        categories(&self.candidates)
    }

    fn require(&self, id: &ToolId) -> DirectoryResult<()> {
        match self.tool(id) {
            Some(_) => Ok(()),
            None => Err(DirectoryError::UnknownTool(id.clone())),
        }
    }

    fn rebuild_candidates(&mut self) {
        self.candidates = self
            .catalog
            .tools()
            .iter()
            .chain(self.custom.tools())
            .cloned()
            .collect();
        self.search.invalidate();
    }

    // ── Search ───────────────────────────────────────────────────

    /// Records live query text; see [`DebouncedSearch::set_query`].
    pub fn set_query(&mut self, raw: impl Into<String>) {
        self.search.set_query(raw);
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_searching()
    }

    /// Promotes the query if its delay has elapsed.
    pub fn poll_search(&mut self) -> bool {
        self.search.poll()
    }

    /// Waits out the debounce delay.
    pub async fn settle_search(&mut self) -> bool {
        self.search.settled().await
    }

    /// Promotes the query without waiting.
    pub fn flush_search(&mut self) -> bool {
        self.search.flush()
    }

    pub fn search(&self) -> &DebouncedSearch<Tool> {
        &self.search
    }

    /// Tools matching the active query only.
    pub fn search_results(&mut self) -> SearchResults<'_, Tool> {
        self.search.results(&self.candidates)
    }

    /// Tools matching the active query, then `filter`, in catalogue order.
    pub fn visible_tools(&mut self, filter: &ToolFilter) -> Vec<Tool> {
        let matched = self.search.results(&self.candidates);
        matched
            .iter()
            .filter(|tool| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|category| &tool.category == category)
            })
            .filter(|tool| !filter.favorites_only || self.favorites.contains(&tool.id))
            .cloned()
            .collect()
    }

    // ── Favorites and saved tools ────────────────────────────────

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Stars or unstars a tool; returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, id: &ToolId) -> DirectoryResult<bool> {
        self.require(id)?;
        Ok(self.favorites.toggle(id))
    }

    pub fn saved(&self) -> &SavedTools {
        &self.saved
    }

    /// Saves or unsaves a tool; returns whether it is now saved.
    pub fn toggle_saved(&mut self, id: &ToolId) -> DirectoryResult<bool> {
        self.require(id)?;
        Ok(self.saved.toggle(id))
    }

    // ── Custom tools ─────────────────────────────────────────────

    pub fn custom_tools(&self) -> &[Tool] {
        self.custom.tools()
    }

    pub fn add_custom_tool(&mut self, draft: ToolDraft) -> DirectoryResult<Tool> {
        let tool = self.custom.add(draft)?;
        self.rebuild_candidates();
        debug!("added custom tool {}", tool.id);
        Ok(tool)
    }

    /// Removes a custom tool, along with any favorite, saved or bundle
    /// reference to it.
    pub fn remove_custom_tool(&mut self, id: &ToolId) -> bool {
        if !self.custom.remove(id) {
            return false;
        }
        if self.favorites.contains(id) {
            self.favorites.remove(id);
        }
        if self.saved.contains(id) {
            self.saved.remove(id);
        }
        self.bundle.remove(id);
        self.rebuild_candidates();
        true
    }

    // ── Bundle ───────────────────────────────────────────────────

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    pub fn add_to_bundle(&mut self, id: &ToolId) -> DirectoryResult<()> {
        self.bundle.add(id, &self.candidates)
    }

    pub fn remove_from_bundle(&mut self, id: &ToolId) -> bool {
        self.bundle.remove(id)
    }

    pub fn clear_bundle(&mut self) {
        self.bundle.clear();
    }

    /// Tools to open side by side, in pane order.
    pub fn bundle_panes(&self) -> Vec<&Tool> {
        self.bundle.panes(&self.candidates)
    }

    // ── Preferences ──────────────────────────────────────────────

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Applies changes made by other observers and contexts.
    ///
    /// Returns true if anything changed.
    pub fn refresh(&mut self) -> bool {
        let custom_changed = self.custom.refresh();
        if custom_changed {
            self.rebuild_candidates();
        }
        custom_changed
            | self.favorites.refresh()
            | self.saved.refresh()
            | self.bundle.refresh()
            | self.preferences.refresh()
    }

    /// Wipes every persisted setting and resets the directory to defaults.
    pub fn reset(&mut self) {
        self.store.clear();
        self.refresh();
    }
}
