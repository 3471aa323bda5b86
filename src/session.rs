// ABOUTME: Session - per-conversation user identity, key-value state, and
// ABOUTME: message history. Created once at startup, mutated only in place.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::llm::Message;

/// State key holding the user identity.
pub const USER_ID_KEY: &str = "user_id";

/// One conversation with one user.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    app_name: String,
    /// Arbitrary key-value state. Seeded with the user identity.
    pub state: HashMap<String, Value>,
    /// Conversation history owned by the runtime.
    pub messages: Vec<Message>,
}

/// Read-only view of a session handed to hooks.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub session_id: String,
    pub user_id: Option<String>,
    pub state: HashMap<String, Value>,
}

impl Session {
    /// Create a session for `user_id`.
    pub fn new(app_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        let mut state = HashMap::new();
        state.insert(USER_ID_KEY.to_string(), Value::String(user_id.into()));
        Self::with_state(app_name, state)
    }

    /// Create a session from an explicit state map.
    pub fn with_state(app_name: impl Into<String>, state: HashMap<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            app_name: app_name.into(),
            state,
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The user identity from state; an empty string counts as absent.
    pub fn user_id(&self) -> Option<&str> {
        self.state
            .get(USER_ID_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id.clone(),
            user_id: self.user_id().map(str::to_string),
            state: self.state.clone(),
        }
    }
}
