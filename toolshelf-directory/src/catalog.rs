//! The built-in tool catalogue.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use toolshelf_types::Tool;
use tracing::warn;

use crate::error::DirectoryResult;

/// Number of tools listed under one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Static tools shipped with the application.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tools: Vec<Tool>,
}

impl Catalog {
    /// Builds a catalogue, dropping tools whose id was already seen.
    pub fn new(tools: Vec<Tool>) -> Self {
        let mut seen = HashSet::new();
        let tools = tools
            .into_iter()
            .filter(|tool| {
                let fresh = seen.insert(tool.id.clone());
                if !fresh {
                    warn!("Dropping duplicate catalogue entry {}", tool.id);
                }
                fresh
            })
            .collect();
        Self { tools }
    }

    /// Parses a JSON array of tools.
    pub fn from_json(json: &str) -> DirectoryResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Reads a JSON catalogue file.
    pub fn load(path: impl AsRef<Path>) -> DirectoryResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Distinct categories across `tools`, sorted by name, with counts.
pub fn categories(tools: &[Tool]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tool in tools {
        *counts.entry(tool.category.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| CategoryCount {
            name: name.to_string(),
            count,
        })
        .collect()
}
