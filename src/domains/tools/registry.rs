//! Tool Registry - the ordered list of configured tools.
//!
//! This module provides:
//! - Validation of every configured tool definition
//! - Shared, read-only access to definitions by position
//! - The JSON Schema of a tool definition

use std::sync::Arc;

use tracing::info;

use super::definition::ToolDefinition;
use super::error::ToolError;

/// Tools whose content is loaded at start-up. The rest load on first use.
pub const MAX_PRELOADED_TOOLS: usize = 60;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - the validated tools in configured order.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<ToolDefinition>>,
}

impl ToolRegistry {
    /// Validate `definitions` and build a registry from them.
    pub fn new(definitions: Vec<ToolDefinition>) -> Result<Self, ToolError> {
        if definitions.is_empty() {
            return Err(ToolError::configuration(
                "<config>",
                "at least one tool must be configured",
            ));
        }

        for definition in &definitions {
            definition.validate()?;
        }

        info!("Registered {} tools", definitions.len());
        Ok(Self {
            tools: definitions.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definition at `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<ToolDefinition>> {
        self.tools.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ToolDefinition>> {
        self.tools.iter()
    }

    /// Get all tool names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Position of the tool after `index`, wrapping to the first.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tools.len()
    }

    /// Whether the tool at `index` has its content loaded at start-up.
    pub fn is_preloaded(index: usize) -> bool {
        index < MAX_PRELOADED_TOOLS
    }

    /// JSON Schema of one entry of the `tools` list.
    pub fn schema() -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(schemars::schema_for!(ToolDefinition))
    }
}
