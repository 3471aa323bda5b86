// ABOUTME: Defines the Tool trait - a named, schema-described callable the
// ABOUTME: agent runtime dispatches to by name within a session.

use async_trait::async_trait;

use super::ToolResult;
use crate::error::ToolgateError;
use crate::session::Session;

/// A tool that can be executed by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the identifier-safe name the model calls this tool by.
    fn name(&self) -> &str;

    /// Returns the name the tool is known by outside the agent.
    fn original_name(&self) -> &str {
        self.name()
    }

    /// Returns a human-readable description for the LLM.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Whether execution is gated on an authorization handshake.
    fn requires_authorization(&self) -> bool {
        false
    }

    /// Execute the tool with the model-supplied arguments.
    async fn execute(
        &self,
        params: serde_json::Value,
        session: &Session,
    ) -> Result<ToolResult, ToolgateError>;
}
