//! User-defined tools.

use serde::{Deserialize, Serialize};
use toolshelf_store::{SyncedLocalStore, SyncedValue};
use toolshelf_types::{keys, Tool, ToolId};

use crate::error::{DirectoryError, DirectoryResult};

/// Category assigned to custom tools that do not name one.
pub const DEFAULT_CUSTOM_CATEGORY: &str = "Custom";

/// What the user fills in to add a tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDraft {
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: Option<String>,
}

impl ToolDraft {
    fn into_tool(self) -> DirectoryResult<Tool> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DirectoryError::InvalidTool("name must not be empty".into()));
        }
        let url = self.url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(DirectoryError::InvalidTool(format!(
                "url must start with http:// or https://, got {url:?}"
            )));
        }
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CUSTOM_CATEGORY);
        Ok(Tool::new(
            ToolId::new_custom(),
            name,
            self.description.trim(),
            url,
            category,
        ))
    }
}

/// Tools the user added on top of the catalogue.
pub struct CustomTools {
    tools: SyncedValue<Vec<Tool>>,
}

impl CustomTools {
    pub fn open(store: &SyncedLocalStore) -> Self {
        Self {
            tools: store.observe(keys::CUSTOM_TOOLS, Vec::new()),
        }
    }

    pub fn tools(&self) -> &[Tool] {
        self.tools.get()
    }

    /// Validates `draft`, assigns it an id and appends it.
    pub fn add(&mut self, draft: ToolDraft) -> DirectoryResult<Tool> {
        let tool = draft.into_tool()?;
        let added = tool.clone();
        self.tools.update(move |tools| {
            let mut next = tools.clone();
            next.push(added);
            next
        });
        Ok(tool)
    }

    /// Removes the tool with `id`; false if there was none.
    pub fn remove(&mut self, id: &ToolId) -> bool {
        if !self.tools.get().iter().any(|tool| &tool.id == id) {
            return false;
        }
        self.tools
            .update(|tools| tools.iter().filter(|tool| &tool.id != id).cloned().collect());
        true
    }

    pub fn refresh(&mut self) -> bool {
        self.tools.poll_changes()
    }
}
