//! Durable storage keys owned by the tool directory.
//!
//! Each key belongs to exactly one feature.

pub const FAVORITES: &str = "favorites";
pub const CUSTOM_TOOLS: &str = "custom-tools";
pub const CARD_COLOR: &str = "card-color";
pub const VIEW_MODE: &str = "view-mode";
pub const SIDEBAR_VISIBLE: &str = "floating-sidebar-visible";
pub const SIDEBAR_POSITION: &str = "floating-sidebar-position";
pub const SIDEBAR_Y: &str = "floating-sidebar-y";
pub const SAVED_TOOLS: &str = "saved-tools-storage";
pub const TOOL_BUNDLE: &str = "tool-bundle";
