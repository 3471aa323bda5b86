// ABOUTME: Wire types for the remote tool service - tool definitions,
// ABOUTME: authorization responses, and execution results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tool descriptor as served by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Short tool name, unique within its toolkit.
    pub name: String,

    /// Canonical identifier, e.g. `Google.SendEmail`.
    pub qualified_name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolkit: Option<ToolkitInfo>,

    #[serde(default)]
    pub input: ToolInput,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<ToolRequirements>,
}

impl ToolDefinition {
    /// Whether calling this tool needs a completed authorization handshake.
    pub fn requires_authorization(&self) -> bool {
        self.requirements
            .as_ref()
            .is_some_and(|r| r.authorization.is_some())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolkitInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The parameter list of a remote tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value_schema: ValueSchema,
}

/// Type information for one parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueSchema {
    pub val_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_val_type: Option<String>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<AuthorizationRequirement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizationRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
}

/// One page of a tool listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolPage {
    #[serde(default)]
    pub items: Vec<ToolDefinition>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
}

/// Status of an authorization handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Result of an authorization request for a (tool, user) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub status: AuthorizationStatus,

    /// Where the user grants access while the handshake is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub scopes: Vec<String>,
}

impl AuthorizationResponse {
    pub fn is_completed(&self) -> bool {
        self.status == AuthorizationStatus::Completed
    }
}

/// Result of a remote tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ExecuteOutput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecuteOutput {
    #[serde(default)]
    pub value: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExecuteFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteFailure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<String>,
}
