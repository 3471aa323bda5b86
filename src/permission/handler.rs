// ABOUTME: Approval requests and the ApprovalHandler seam that answers them,
// ABOUTME: consulted when the confirmation policy says Ask.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::llm::ToolCall;
use crate::session::SessionInfo;

/// A pending tool call waiting for a yes or no.
#[derive(Debug, Clone)]
pub struct ApprovalRequest {
    pub request_id: String,
    pub tool_name: String,
    pub arguments: Value,
    pub session: SessionInfo,
}

impl ApprovalRequest {
    pub fn new(call: &ToolCall, session: SessionInfo) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            tool_name: call.name.clone(),
            arguments: call.arguments.clone(),
            session,
        }
    }

    /// Question shown to a person deciding on the call.
    pub fn prompt(&self) -> String {
        format!("Run tool '{}' with {}? [y/N] ", self.tool_name, self.arguments)
    }
}

#[async_trait]
pub trait ApprovalHandler: Send + Sync {
    /// `Ok(false)` declines the call. `Err` ends the turn.
    async fn approve(&self, request: &ApprovalRequest) -> Result<bool, anyhow::Error>;
}

/// Says yes to everything.
pub struct AlwaysApprove;

#[async_trait]
impl ApprovalHandler for AlwaysApprove {
    async fn approve(&self, _request: &ApprovalRequest) -> Result<bool, anyhow::Error> {
        Ok(true)
    }
}

/// Says no to everything.
pub struct AlwaysReject;

#[async_trait]
impl ApprovalHandler for AlwaysReject {
    async fn approve(&self, _request: &ApprovalRequest) -> Result<bool, anyhow::Error> {
        Ok(false)
    }
}

/// Whether a typed answer means yes. Anything but `y`/`yes` is a no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
