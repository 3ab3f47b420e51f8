//! Core type definitions for Toolshelf.
//!
//! This crate defines the plain data shared by every other crate:
//! - Context and observer identifiers (UUID v7)
//! - Tool identifiers and catalogue records
//! - Display preference enums
//! - The well-known durable storage keys
//!
//! Nothing here touches storage or owns state.

mod ids;
pub mod keys;
mod prefs;
mod tool;

pub use ids::{ContextId, ObserverId, ToolId};
pub use prefs::{SidebarPosition, ViewMode};
pub use tool::{Pricing, Tool};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid tool id: {0:?}")]
    InvalidToolId(String),

    #[error("unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}
