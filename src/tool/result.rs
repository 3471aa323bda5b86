// ABOUTME: Defines the ToolResult type - the value a successful tool call
// ABOUTME: produced, plus execution metadata.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// Result of a successful tool execution.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The output payload.
    pub value: Value,

    /// Optional metadata about the execution.
    pub metadata: HashMap<String, Value>,
}

impl ToolResult {
    /// Create a result from a JSON value.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            metadata: HashMap::new(),
        }
    }

    /// Create a plain text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(Value::String(content.into()))
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), v);
        }
        self
    }

    /// Render the value as message content for the model.
    ///
    /// Strings pass through unquoted; everything else is serialized JSON.
    pub fn to_content(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}
