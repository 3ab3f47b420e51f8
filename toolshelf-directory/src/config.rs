//! Directory configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{DirectoryError, DirectoryResult};

/// Tunables for a [`ToolDirectory`](crate::ToolDirectory).
///
/// Every field has a default, so a partial JSON document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// How long the query must be stable before it is searched (ms).
    pub search_debounce_ms: u64,
    /// Number of distinct queries whose results are cached.
    pub search_cache_capacity: usize,
    /// Undelivered change notifications buffered per observer.
    pub notification_capacity: usize,
    /// Maximum number of tools opened side by side.
    pub bundle_limit: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            search_cache_capacity: 50,
            notification_capacity: 64,
            bundle_limit: 4,
        }
    }
}

impl DirectoryConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> DirectoryResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> DirectoryResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Rejects values the directory cannot work with.
    pub fn validate(&self) -> DirectoryResult<()> {
        if self.notification_capacity == 0 {
            return Err(DirectoryError::Config(
                "notification_capacity must be at least 1".into(),
            ));
        }
        if self.bundle_limit == 0 {
            return Err(DirectoryError::Config("bundle_limit must be at least 1".into()));
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
