// ABOUTME: Implements the Registry - the dispatch table mapping tool names to
// ABOUTME: callable tools, with collision detection on registration.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::Tool;
use crate::error::ConfigError;
use crate::llm::FunctionDeclaration;

/// A thread-safe registry of tools, keyed by the name the model calls.
#[derive(Default)]
pub struct Registry {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    pub async fn register<T: Tool + 'static>(&self, tool: T) -> Result<(), ConfigError> {
        self.register_arc(Arc::new(tool)).await
    }

    /// Register a tool from an Arc.
    ///
    /// Re-registering the same original name replaces the entry. A different
    /// tool whose name collides fails with [`ConfigError::NameConflict`].
    pub async fn register_arc(&self, tool: Arc<dyn Tool>) -> Result<(), ConfigError> {
        let mut tools = self.tools.write().await;
        if let Some(existing) = tools.get(tool.name()) {
            if existing.original_name() != tool.original_name() {
                return Err(ConfigError::NameConflict {
                    sanitized: tool.name().to_string(),
                    existing: existing.original_name().to_string(),
                    incoming: tool.original_name().to_string(),
                });
            }
        }
        tools.insert(tool.name().to_string(), tool);
        Ok(())
    }

    /// Register every tool in order, stopping at the first conflict.
    pub async fn register_all<T, I>(&self, tools: I) -> Result<usize, ConfigError>
    where
        T: Tool + 'static,
        I: IntoIterator<Item = T>,
    {
        let mut count = 0;
        for tool in tools {
            self.register(tool).await?;
            count += 1;
        }
        Ok(count)
    }

    /// Unregister a tool by name.
    pub async fn unregister(&self, name: &str) {
        let mut tools = self.tools.write().await;
        tools.remove(name);
    }

    /// Get a tool by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.get(name).cloned()
    }

    /// List all tool names, sorted alphabetically.
    pub async fn list(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        let mut names: Vec<_> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all registered tools.
    pub async fn all(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.values().cloned().collect()
    }

    /// Get the number of registered tools.
    pub async fn count(&self) -> usize {
        let tools = self.tools.read().await;
        tools.len()
    }

    /// Declarations for every tool, sorted by name.
    pub async fn declarations(&self) -> Vec<FunctionDeclaration> {
        let tools = self.tools.read().await;
        let mut defs: Vec<_> = tools
            .values()
            .map(|t| FunctionDeclaration {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            tools: Arc::clone(&self.tools),
        }
    }
}
