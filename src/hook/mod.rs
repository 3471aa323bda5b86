// ABOUTME: Hooks around the agent turn - observe turns and model replies,
// ABOUTME: and vet every tool call before it leaves the process.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::ToolCall;
use crate::session::SessionInfo;
use crate::tool::ToolResult;

/// Points in a turn where hooks run.
#[derive(Debug, Clone)]
pub enum HookEvent {
    /// A user turn begins.
    SessionStart { session_id: String, prompt: String },

    /// The model replied; its tool calls have not run yet.
    ResponseReceived {
        author: String,
        text: String,
        tool_calls: Vec<ToolCall>,
    },

    /// A tool call is about to run. Hooks may block it or rewrite its
    /// arguments.
    PreToolUse { call: ToolCall, session: SessionInfo },

    /// A tool call returned.
    PostToolUse { call: ToolCall, result: ToolResult },

    /// The turn is over. `error` holds the failure message, if any.
    SessionEnd {
        session_id: String,
        error: Option<String>,
    },
}

impl HookEvent {
    /// Name of the tool involved, for tool-call events.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            HookEvent::PreToolUse { call, .. } | HookEvent::PostToolUse { call, .. } => {
                Some(&call.name)
            }
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            HookEvent::SessionStart { .. } => "SessionStart",
            HookEvent::ResponseReceived { .. } => "ResponseReceived",
            HookEvent::PreToolUse { .. } => "PreToolUse",
            HookEvent::PostToolUse { .. } => "PostToolUse",
            HookEvent::SessionEnd { .. } => "SessionEnd",
        }
    }
}

/// What a hook wants done with the event.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HookAction {
    #[default]
    Continue,

    /// Refuse the tool call; the reason is reported to the model.
    Block(String),

    /// Run the tool call with these arguments instead.
    Transform(Value),
}

#[async_trait]
pub trait Hook: Send + Sync {
    /// Handle one event. `Err` ends the turn.
    async fn on_event(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error>;

    fn accepts(&self, event: &HookEvent) -> bool {
        let _ = event;
        true
    }
}

/// Ordered chain of hooks. Assembled at startup, then shared read-only by
/// the runtime.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn Hook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: impl Hook + 'static) -> &mut Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn register_arc(&mut self, hook: Arc<dyn Hook>) -> &mut Self {
        self.hooks.push(hook);
        self
    }

    /// Add a closure consulted before every tool call.
    pub fn on_pre_tool_use<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&ToolCall, &SessionInfo) -> HookAction + Send + Sync + 'static,
    {
        self.register(PreToolUseFn(f))
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the chain in registration order.
    ///
    /// The first `Block` stops the chain. A `Transform` rewrites the call
    /// that later hooks see and is returned unless something blocks after
    /// it. Transforming anything but a `PreToolUse` is an error.
    pub async fn fire(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error> {
        let mut current = event.clone();
        let mut outcome = HookAction::Continue;

        for hook in self.hooks.iter().filter(|h| h.accepts(event)) {
            match hook.on_event(&current).await? {
                HookAction::Continue => {}
                HookAction::Block(reason) => return Ok(HookAction::Block(reason)),
                HookAction::Transform(arguments) => {
                    let HookEvent::PreToolUse { call, .. } = &mut current else {
                        anyhow::bail!("{} hooks cannot rewrite tool arguments", current.kind());
                    };
                    call.arguments = arguments.clone();
                    outcome = HookAction::Transform(arguments);
                }
            }
        }

        Ok(outcome)
    }
}

struct PreToolUseFn<F>(F);

#[async_trait]
impl<F> Hook for PreToolUseFn<F>
where
    F: Fn(&ToolCall, &SessionInfo) -> HookAction + Send + Sync,
{
    fn accepts(&self, event: &HookEvent) -> bool {
        matches!(event, HookEvent::PreToolUse { .. })
    }

    async fn on_event(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error> {
        match event {
            HookEvent::PreToolUse { call, session } => Ok((self.0)(call, session)),
            _ => Ok(HookAction::Continue),
        }
    }
}
