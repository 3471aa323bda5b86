// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use toolgate::prelude::*;` to get started quickly.

pub use crate::agent::{Agent, Event, EventStream, Runner};
pub use crate::auth::{authorize, preauthorize};
pub use crate::catalog::{ToolSelection, fetch_definitions, remote_tools};
pub use crate::config::Config;
pub use crate::error::{
    AuthorizationError, ConfigError, LlmError, RemoteError, ToolError, ToolgateError,
};
pub use crate::hook::{Hook, HookAction, HookEvent, HookRegistry};
pub use crate::llm::{
    FunctionDeclaration, LlmClient, Message, OpenAIClient, Request, Response, StopReason,
    ToolCall, ToolOutcome, Usage,
};
pub use crate::permission::{
    AlwaysApprove, AlwaysReject, ApprovalHandler, ApprovalRequest, ConfirmationHook, Decision,
    Policy, PolicyBuilder, is_affirmative,
};
pub use crate::remote::{
    AuthorizationResponse, AuthorizationStatus, ExecuteResponse, HttpToolService, ToolService,
};
pub use crate::session::{Session, SessionInfo};
pub use crate::tool::{Registry, RemoteTool, Tool, ToolResult, sanitize_name};
