// ABOUTME: Defines all error types for the toolgate library using thiserror.
// ABOUTME: Each concern has its own error enum, unified under ToolgateError.

use crate::remote::{AuthorizationResponse, ExecuteResponse};

/// Top-level error type for the toolgate library.
#[derive(Debug, thiserror::Error)]
pub enum ToolgateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Hook error: {0}")]
    Hook(#[source] anyhow::Error),
}

/// Caller-setup faults. Surfaced immediately and never retried.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no user identity available")]
    MissingUserId,

    #[error("No tools or toolkits provided to retrieve tool definitions")]
    EmptySelection,

    #[error("Malformed schema for tool '{tool}': {message}")]
    Schema { tool: String, message: String },

    #[error(
        "Tools '{existing}' and '{incoming}' both map to the name '{sanitized}'"
    )]
    NameConflict {
        sanitized: String,
        existing: String,
        incoming: String,
    },

    #[error("Environment variable {0} is not set")]
    MissingVar(String),

    #[error("Invalid value for {name}: {message}")]
    InvalidVar { name: String, message: String },
}

/// The remote authorization handshake did not report completion.
#[derive(Debug, thiserror::Error)]
#[error("authorization for '{tool_name}' not completed (status: {})", .response.status)]
pub struct AuthorizationError {
    pub tool_name: String,
    pub response: AuthorizationResponse,
}

/// Errors from tool dispatch and remote execution.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Execution of '{tool_name}' failed: {}", execution_message(.response))]
    Execution {
        tool_name: String,
        response: ExecuteResponse,
    },
}

fn execution_message(response: &ExecuteResponse) -> &str {
    response
        .output
        .as_ref()
        .and_then(|o| o.error.as_ref())
        .map(|e| e.message.as_str())
        .unwrap_or("remote service reported failure")
}

/// Errors talking to the remote tool service.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Agent exceeded max iterations ({0})")]
    MaxIterations(usize),
}
