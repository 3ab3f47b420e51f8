//! Display preferences.

use toolshelf_store::{SyncedLocalStore, SyncedValue};
use toolshelf_types::{keys, SidebarPosition, ViewMode};

/// Default vertical sidebar offset, as a percentage of the viewport.
pub const DEFAULT_SIDEBAR_Y: f64 = 50.0;

/// Per-user display settings, each persisted under its own key.
pub struct Preferences {
    card_color: SyncedValue<Option<String>>,
    view_mode: SyncedValue<ViewMode>,
    sidebar_visible: SyncedValue<bool>,
    sidebar_position: SyncedValue<SidebarPosition>,
    sidebar_y: SyncedValue<f64>,
}

impl Preferences {
    pub fn open(store: &SyncedLocalStore) -> Self {
        Self {
            card_color: store.observe(keys::CARD_COLOR, None),
            view_mode: store.observe(keys::VIEW_MODE, ViewMode::default()),
            sidebar_visible: store.observe(keys::SIDEBAR_VISIBLE, true),
            sidebar_position: store.observe(keys::SIDEBAR_POSITION, SidebarPosition::default()),
            sidebar_y: store.observe(keys::SIDEBAR_Y, DEFAULT_SIDEBAR_Y),
        }
    }

    pub fn card_color(&self) -> Option<&str> {
        self.card_color.get().as_deref()
    }

    /// Sets the card color; `None` restores the theme default.
    pub fn set_card_color(&mut self, color: Option<String>) {
        self.card_color.set(color);
    }

    pub fn view_mode(&self) -> ViewMode {
        *self.view_mode.get()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode.set(mode);
    }

    pub fn sidebar_visible(&self) -> bool {
        *self.sidebar_visible.get()
    }

    pub fn set_sidebar_visible(&mut self, visible: bool) {
        self.sidebar_visible.set(visible);
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_visible.update(|visible| !visible);
        self.sidebar_visible()
    }

    pub fn sidebar_position(&self) -> SidebarPosition {
        *self.sidebar_position.get()
    }

    pub fn set_sidebar_position(&mut self, position: SidebarPosition) {
        self.sidebar_position.set(position);
    }

    pub fn sidebar_y(&self) -> f64 {
        *self.sidebar_y.get()
    }

    /// Moves the sidebar, clamped to the viewport. Non-finite input is
    /// ignored.
    pub fn set_sidebar_y(&mut self, y: f64) {
        if y.is_finite() {
            self.sidebar_y.set(y.clamp(0.0, 100.0));
        }
    }

    /// Applies pending notifications; true if any preference changed.
    pub fn refresh(&mut self) -> bool {
        // Non-short-circuiting: every observer must drain its feeds.
        self.card_color.poll_changes()
            | self.view_mode.poll_changes()
            | self.sidebar_visible.poll_changes()
            | self.sidebar_position.poll_changes()
            | self.sidebar_y.poll_changes()
    }
}
