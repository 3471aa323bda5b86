// ABOUTME: RemoteTool wraps a remote tool definition as a local Tool.
// ABOUTME: Calls run the authorization gate, then forward to remote execute.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::info;

use super::{Tool, ToolResult};
use crate::auth;
use crate::error::{ConfigError, ToolError, ToolgateError};
use crate::remote::{ToolDefinition, ToolService};
use crate::schema::{self, FunctionParameters};
use crate::session::Session;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid regex"));

/// Rewrite a qualified name into one accepted as a function name
/// (`^[a-zA-Z0-9_-]+$`). Every other character, `.` included, becomes `_`.
pub fn sanitize_name(qualified_name: &str) -> String {
    DISALLOWED.replace_all(qualified_name, "_").into_owned()
}

/// A tool hosted by the remote service.
pub struct RemoteTool {
    name: String,
    original_name: String,
    description: String,
    parameters: FunctionParameters,
    requires_authorization: bool,
    service: Arc<dyn ToolService>,
}

impl RemoteTool {
    /// Wrap a fetched definition. Fails if its parameter schema is malformed.
    pub fn new(def: &ToolDefinition, service: Arc<dyn ToolService>) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(
            &def.qualified_name,
            &def.description,
            schema::translate(def)?,
            def.requires_authorization(),
            service,
        ))
    }

    /// Build a tool from already-translated parts.
    pub fn from_parts(
        qualified_name: &str,
        description: &str,
        parameters: FunctionParameters,
        requires_authorization: bool,
        service: Arc<dyn ToolService>,
    ) -> Self {
        Self {
            name: sanitize_name(qualified_name),
            original_name: qualified_name.to_string(),
            description: description.to_string(),
            parameters,
            requires_authorization,
            service,
        }
    }

    pub fn parameters(&self) -> &FunctionParameters {
        &self.parameters
    }
}

impl std::fmt::Debug for RemoteTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTool")
            .field("name", &self.name)
            .field("original_name", &self.original_name)
            .field("requires_authorization", &self.requires_authorization)
            .finish()
    }
}

#[async_trait]
impl Tool for RemoteTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn original_name(&self) -> &str {
        &self.original_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> serde_json::Value {
        self.parameters.to_value()
    }

    fn requires_authorization(&self) -> bool {
        self.requires_authorization
    }

    /// Arguments are forwarded as-is; the remote side owns validation.
    async fn execute(
        &self,
        params: serde_json::Value,
        session: &Session,
    ) -> Result<ToolResult, ToolgateError> {
        if self.requires_authorization {
            auth::authorize(self.service.as_ref(), session, &self.original_name).await?;
        }

        info!(tool = %self.original_name, args = %params, "executing tool");

        let response = self
            .service
            .execute(&self.original_name, params, session.user_id())
            .await?;

        if !response.success {
            return Err(ToolError::Execution {
                tool_name: self.original_name.clone(),
                response,
            }
            .into());
        }

        let value = response.output.map(|o| o.value).unwrap_or_default();
        let mut result = ToolResult::new(value);
        if let Some(id) = response.id {
            result = result.with_metadata("execution_id", id);
        }
        Ok(result)
    }
}
