//! Error types for directory operations.

use thiserror::Error;
use toolshelf_storage::StorageError;
use toolshelf_types::ToolId;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors surfaced by directory operations that validate input.
///
/// Persistence problems never show up here; synced values log and carry on.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Opening durable storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration or catalogue JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a configuration or catalogue file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No tool with this id exists in the catalogue.
    #[error("unknown tool: {0}")]
    UnknownTool(ToolId),

    /// The bundle already holds as many tools as it can show.
    #[error("bundle is full ({limit} tools)")]
    BundleFull { limit: usize },

    /// A custom tool draft failed validation.
    #[error("invalid tool: {0}")]
    InvalidTool(String),
}
