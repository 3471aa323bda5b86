// ABOUTME: In-memory ToolService for unit tests. Serves canned definitions and
// ABOUTME: responses and records every call made against it.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    AuthorizationResponse, AuthorizationStatus, ExecuteOutput, ExecuteResponse, ToolDefinition,
    ToolInput, ToolPage, ToolRequirements, ToolService, ToolkitInfo,
};
use crate::error::RemoteError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List {
        toolkit: Option<String>,
        offset: usize,
    },
    Get(String),
    Authorize {
        tool: String,
        user: String,
    },
    Status(String),
    Execute {
        tool: String,
        input: serde_json::Value,
        user: Option<String>,
    },
}

pub struct FakeService {
    pub tools: Vec<ToolDefinition>,
    pub page_size: usize,
    pub auth_status: AuthorizationStatus,
    /// Statuses returned by successive status polls.
    pub status_sequence: Mutex<Vec<AuthorizationStatus>>,
    pub execute: ExecuteResponse,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeService {
    pub fn new(tools: Vec<ToolDefinition>) -> Self {
        Self {
            tools,
            page_size: 100,
            auth_status: AuthorizationStatus::Completed,
            status_sequence: Mutex::new(Vec::new()),
            execute: ExecuteResponse {
                id: Some("te_1".into()),
                success: true,
                output: Some(ExecuteOutput {
                    value: serde_json::json!({"results": []}),
                    error: None,
                }),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn executed(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, Call::Execute { .. }))
    }

    pub fn authorized(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, Call::Authorize { .. }))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// A parameterless definition whose toolkit is the prefix before the first dot.
pub fn definition(qualified_name: &str, requires_auth: bool) -> ToolDefinition {
    let (toolkit, name) = qualified_name
        .split_once('.')
        .unwrap_or(("Default", qualified_name));
    ToolDefinition {
        name: name.to_string(),
        qualified_name: qualified_name.to_string(),
        description: format!("{} tool", name),
        toolkit: Some(ToolkitInfo {
            name: toolkit.to_string(),
            version: None,
        }),
        input: ToolInput::default(),
        requirements: requires_auth.then(|| ToolRequirements {
            authorization: Some(Default::default()),
        }),
    }
}

#[async_trait]
impl ToolService for FakeService {
    async fn list_tools(
        &self,
        toolkit: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<ToolPage, RemoteError> {
        self.record(Call::List {
            toolkit: toolkit.map(str::to_string),
            offset,
        });
        let matching: Vec<_> = self
            .tools
            .iter()
            .filter(|t| match toolkit {
                Some(tk) => t.toolkit.as_ref().is_some_and(|k| k.name == tk),
                None => true,
            })
            .cloned()
            .collect();
        let limit = limit.min(self.page_size);
        Ok(ToolPage {
            total_count: matching.len(),
            items: matching.into_iter().skip(offset).take(limit).collect(),
            offset,
            limit,
        })
    }

    async fn get_tool(&self, qualified_name: &str) -> Result<ToolDefinition, RemoteError> {
        self.record(Call::Get(qualified_name.to_string()));
        self.tools
            .iter()
            .find(|t| t.qualified_name == qualified_name)
            .cloned()
            .ok_or_else(|| RemoteError::Api {
                status: 404,
                message: format!("tool {} not found", qualified_name),
            })
    }

    async fn authorize(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationResponse, RemoteError> {
        self.record(Call::Authorize {
            tool: tool_name.to_string(),
            user: user_id.to_string(),
        });
        Ok(AuthorizationResponse {
            id: Some("ar_1".into()),
            status: self.auth_status.clone(),
            url: Some("https://auth.example.com/ar_1".into()),
            scopes: Vec::new(),
        })
    }

    async fn authorization_status(
        &self,
        auth_id: &str,
        _wait_secs: u64,
    ) -> Result<AuthorizationResponse, RemoteError> {
        self.record(Call::Status(auth_id.to_string()));
        let mut sequence = self.status_sequence.lock().unwrap();
        let status = if sequence.is_empty() {
            AuthorizationStatus::Failed
        } else {
            sequence.remove(0)
        };
        Ok(AuthorizationResponse {
            id: Some(auth_id.to_string()),
            status,
            url: None,
            scopes: Vec::new(),
        })
    }

    async fn execute(
        &self,
        tool_name: &str,
        input: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<ExecuteResponse, RemoteError> {
        self.record(Call::Execute {
            tool: tool_name.to_string(),
            input,
            user: user_id.map(str::to_string),
        });
        Ok(self.execute.clone())
    }
}
