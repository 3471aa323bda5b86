// ABOUTME: Defines the ToolService trait - the operations consumed from the
// ABOUTME: remote tool-execution service (list, authorize, execute).

use async_trait::async_trait;

use super::{AuthorizationResponse, ExecuteResponse, ToolDefinition, ToolPage};
use crate::error::RemoteError;

/// A remote service hosting tool definitions and executing them.
#[async_trait]
pub trait ToolService: Send + Sync {
    /// List tool definitions, optionally restricted to one toolkit.
    async fn list_tools(
        &self,
        toolkit: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<ToolPage, RemoteError>;

    /// Fetch one tool definition by its qualified name.
    async fn get_tool(&self, qualified_name: &str) -> Result<ToolDefinition, RemoteError>;

    /// Start (or check) the authorization handshake for a user and tool.
    async fn authorize(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationResponse, RemoteError>;

    /// Check a pending handshake, letting the service hold the request for
    /// up to `wait_secs` seconds.
    async fn authorization_status(
        &self,
        auth_id: &str,
        wait_secs: u64,
    ) -> Result<AuthorizationResponse, RemoteError>;

    /// Execute a tool by qualified name.
    async fn execute(
        &self,
        tool_name: &str,
        input: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<ExecuteResponse, RemoteError>;
}
