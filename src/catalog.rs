// ABOUTME: Tool catalog - fetches remote tool definitions by name or toolkit
// ABOUTME: and wraps them as RemoteTools with unique sanitized names.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ConfigError, ToolgateError};
use crate::remote::{ToolDefinition, ToolService};
use crate::tool::{RemoteTool, Tool};

/// Page size used when listing a toolkit.
pub const PAGE_SIZE: usize = 100;

/// Which remote tools to expose to the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSelection {
    /// Explicit qualified tool names.
    pub tools: Vec<String>,
    /// Toolkits whose every tool is included.
    pub toolkits: Vec<String>,
}

impl ToolSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(mut self, name: impl Into<String>) -> Self {
        self.tools.push(name.into());
        self
    }

    pub fn toolkit(mut self, name: impl Into<String>) -> Self {
        self.toolkits.push(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.toolkits.is_empty()
    }
}

/// Fetch the definitions matching `selection`.
///
/// An empty selection fails with [`ConfigError::EmptySelection`] when
/// `raise_on_empty` is set and yields nothing otherwise; either way no request
/// is sent.
pub async fn fetch_definitions(
    service: &dyn ToolService,
    selection: &ToolSelection,
    raise_on_empty: bool,
) -> Result<Vec<ToolDefinition>, ToolgateError> {
    if selection.is_empty() {
        if raise_on_empty {
            return Err(ConfigError::EmptySelection.into());
        }
        return Ok(Vec::new());
    }

    let mut definitions = Vec::new();

    for name in &selection.tools {
        definitions.push(service.get_tool(name).await?);
    }

    for toolkit in &selection.toolkits {
        let mut offset = 0;
        loop {
            let page = service.list_tools(Some(toolkit), PAGE_SIZE, offset).await?;
            debug!(
                toolkit = %toolkit,
                offset,
                count = page.items.len(),
                total = page.total_count,
                "listed toolkit page"
            );
            if page.items.is_empty() {
                break;
            }
            offset += page.items.len();
            definitions.extend(page.items);
            if offset >= page.total_count {
                break;
            }
        }
    }

    Ok(definitions)
}

/// Fetch the selected definitions and wrap each one as a [`RemoteTool`].
///
/// A qualified name seen twice (once by name, once through its toolkit) is
/// wrapped once. Distinct qualified names that sanitize to the same name fail
/// with [`ConfigError::NameConflict`].
pub async fn remote_tools(
    service: Arc<dyn ToolService>,
    selection: &ToolSelection,
    raise_on_empty: bool,
) -> Result<Vec<RemoteTool>, ToolgateError> {
    let definitions = fetch_definitions(service.as_ref(), selection, raise_on_empty).await?;

    let mut by_name: HashMap<String, String> = HashMap::new();
    let mut tools = Vec::with_capacity(definitions.len());

    for def in &definitions {
        let tool = RemoteTool::new(def, service.clone())?;
        match by_name.get(tool.name()) {
            Some(existing) if existing == tool.original_name() => continue,
            Some(existing) => {
                return Err(ConfigError::NameConflict {
                    sanitized: tool.name().to_string(),
                    existing: existing.clone(),
                    incoming: tool.original_name().to_string(),
                }
                .into());
            }
            None => {
                by_name.insert(tool.name().to_string(), tool.original_name().to_string());
                tools.push(tool);
            }
        }
    }

    Ok(tools)
}
