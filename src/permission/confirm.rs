// ABOUTME: ConfirmationHook - the pre-tool-call hook that applies a Policy and
// ABOUTME: defers Ask decisions to an ApprovalHandler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{ApprovalHandler, ApprovalRequest, Decision, Policy};
use crate::hook::{Hook, HookAction, HookEvent};

/// Requires confirmation before tool calls, according to a policy.
pub struct ConfirmationHook {
    policy: Policy,
    handler: Arc<dyn ApprovalHandler>,
}

impl ConfirmationHook {
    pub fn new(policy: Policy, handler: Arc<dyn ApprovalHandler>) -> Self {
        Self { policy, handler }
    }
}

#[async_trait]
impl Hook for ConfirmationHook {
    fn accepts(&self, event: &HookEvent) -> bool {
        matches!(event, HookEvent::PreToolUse { .. })
    }

    async fn on_event(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error> {
        let HookEvent::PreToolUse { call, session } = event else {
            return Ok(HookAction::Continue);
        };

        match self.policy.evaluate(&call.name, &call.arguments) {
            Decision::Allow => Ok(HookAction::Continue),
            Decision::Deny => {
                warn!(tool = %call.name, "tool call denied by policy");
                Ok(HookAction::Block(format!(
                    "Tool '{}' denied by policy",
                    call.name
                )))
            }
            Decision::Ask => {
                let request = ApprovalRequest::new(call, session.clone());
                let approved = self.handler.approve(&request).await?;
                debug!(
                    tool = %call.name,
                    request_id = %request.request_id,
                    approved,
                    "confirmation answered"
                );
                if approved {
                    Ok(HookAction::Continue)
                } else {
                    Ok(HookAction::Block(format!(
                        "User declined to run tool '{}'",
                        call.name
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::llm::ToolCall;
    use crate::permission::{AlwaysApprove, AlwaysReject};
    use crate::session::SessionInfo;

    fn event(tool: &str) -> HookEvent {
        HookEvent::PreToolUse {
            call: ToolCall {
                id: "call_1".into(),
                name: tool.into(),
                arguments: serde_json::json!({"query": "rust"}),
            },
            session: SessionInfo {
                session_id: "sess-1".into(),
                user_id: Some("user-42".into()),
                state: HashMap::new(),
            },
        }
    }

    struct RecordingHandler {
        seen: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl ApprovalHandler for RecordingHandler {
        async fn approve(&self, request: &ApprovalRequest) -> Result<bool, anyhow::Error> {
            self.seen
                .lock()
                .unwrap()
                .push((request.tool_name.clone(), request.session.user_id.clone()));
            Ok(true)
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl ApprovalHandler for FailingHandler {
        async fn approve(&self, _request: &ApprovalRequest) -> Result<bool, anyhow::Error> {
            Err(anyhow::anyhow!("stdin closed"))
        }
    }

    #[tokio::test]
    async fn test_allowed_tool_skips_handler() {
        let hook = ConfirmationHook::new(Policy::allow_all(), Arc::new(AlwaysReject));
        let action = hook.on_event(&event("Search_Web")).await.unwrap();
        assert!(matches!(action, HookAction::Continue));
    }

    #[tokio::test]
    async fn test_denied_tool_blocks() {
        let policy = Policy::builder()
            .deny("Gmail_DeleteEmail")
            .default(Decision::Allow)
            .build();
        let hook = ConfirmationHook::new(policy, Arc::new(AlwaysApprove));

        match hook.on_event(&event("Gmail_DeleteEmail")).await.unwrap() {
            HookAction::Block(msg) => assert!(msg.contains("denied by policy")),
            other => panic!("Expected Block, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ask_approved_continues() {
        let handler = Arc::new(RecordingHandler {
            seen: Mutex::new(Vec::new()),
        });
        let hook = ConfirmationHook::new(Policy::ask_all(), handler.clone());

        let action = hook.on_event(&event("Search_Web")).await.unwrap();
        assert!(matches!(action, HookAction::Continue));
        assert_eq!(
            *handler.seen.lock().unwrap(),
            vec![("Search_Web".to_string(), Some("user-42".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_ask_rejected_blocks() {
        let hook = ConfirmationHook::new(Policy::ask_all(), Arc::new(AlwaysReject));
        match hook.on_event(&event("Search_Web")).await.unwrap() {
            HookAction::Block(msg) => assert!(msg.contains("declined")),
            other => panic!("Expected Block, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handler_failure_propagates() {
        let hook = ConfirmationHook::new(Policy::ask_all(), Arc::new(FailingHandler));
        let err = hook.on_event(&event("Search_Web")).await.unwrap_err();
        assert!(err.to_string().contains("stdin closed"));
    }

    #[tokio::test]
    async fn test_ignores_other_events() {
        let hook = ConfirmationHook::new(Policy::ask_all(), Arc::new(AlwaysReject));
        let other = HookEvent::SessionStart {
            session_id: "s".into(),
            prompt: "hi".into(),
        };
        assert!(!hook.accepts(&other));
    }
}
