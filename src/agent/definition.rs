// ABOUTME: Agent definition - name, model, instruction, tools, and hooks
// ABOUTME: that together describe one conversational agent.

use std::sync::Arc;

use crate::hook::HookRegistry;
use crate::tool::Registry;

/// Default cap on model round-trips within a single turn.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Default output token limit per model call.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// A conversational agent.
#[derive(Clone)]
pub struct Agent {
    /// Author name attached to every event the agent emits.
    pub name: String,

    /// Model identifier, optionally prefixed with a provider (`openai/gpt-4o`).
    pub model: String,

    /// System instruction sent with every request.
    pub instruction: String,

    /// Tools the model may call.
    pub registry: Registry,

    /// Hooks fired around turns and tool calls.
    pub hooks: Arc<HookRegistry>,

    /// Maximum model round-trips per turn.
    pub max_iterations: usize,

    pub max_tokens: u32,
}

impl Agent {
    /// Create an agent with no tools and no hooks.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            instruction: String::new(),
            registry: Registry::new(),
            hooks: Arc::new(HookRegistry::new()),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn hooks(mut self, hooks: Arc<HookRegistry>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}
