//! Tool directory state for Toolshelf.
//!
//! [`ToolDirectory`] is the composition root. It owns the context's
//! [`SyncedLocalStore`](toolshelf_store::SyncedLocalStore), the debounced
//! catalogue search, and one synced observer per feature:
//!
//! - favorites and saved tools (lists of tool ids)
//! - custom tools added by the user
//! - the bundle launcher (tools opened side by side)
//! - display preferences
//!
//! # Example
//!
//! ```
//! use toolshelf_directory::{Catalog, DirectoryConfig, ToolDirectory, ToolFilter};
//! use toolshelf_storage::Origin;
//!
//! let catalog = Catalog::from_json(r#"[
//!     {"id":"json-formatter","name":"JSON Formatter","description":"Pretty-print JSON",
//!      "url":"https://json.example","category":"Dev Utilities"}
//! ]"#).unwrap();
//! let area = Origin::in_memory().open_context();
//! let mut directory = ToolDirectory::init(DirectoryConfig::default(), area, catalog).unwrap();
//!
//! directory.set_query("json");
//! directory.flush_search();
//! assert_eq!(directory.visible_tools(&ToolFilter::default()).len(), 1);
//! ```

mod bundle;
mod catalog;
mod config;
mod custom;
mod directory;
mod error;
mod lists;
mod preferences;

pub use bundle::Bundle;
pub use catalog::{categories, Catalog, CategoryCount};
pub use config::DirectoryConfig;
pub use custom::{CustomTools, ToolDraft, DEFAULT_CUSTOM_CATEGORY};
pub use directory::{ToolDirectory, ToolFilter};
pub use error::{DirectoryError, DirectoryResult};
pub use lists::{Favorites, PersistEnvelope, SavedTools, SavedToolsState};
pub use preferences::{Preferences, DEFAULT_SIDEBAR_Y};
