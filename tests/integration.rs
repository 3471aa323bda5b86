// ABOUTME: Integration tests verifying modules work together.
// ABOUTME: Drives catalog, adapter, gate, hooks, and runner against a stub service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use toolgate::prelude::*;
use toolgate::remote::{ToolDefinition as RemoteDefinition, ToolPage};

/// Stub remote service that records every call as a short string.
struct StubService {
    tools: Vec<RemoteDefinition>,
    status: AuthorizationStatus,
    calls: Mutex<Vec<String>>,
}

impl StubService {
    fn new(tools: Vec<RemoteDefinition>, status: AuthorizationStatus) -> Arc<Self> {
        Arc::new(Self {
            tools,
            status,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ToolService for StubService {
    async fn list_tools(
        &self,
        toolkit: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<ToolPage, RemoteError> {
        self.record(format!("list:{}:{}", toolkit.unwrap_or("*"), offset));
        let matching: Vec<_> = self
            .tools
            .iter()
            .filter(|t| {
                toolkit.is_none_or(|tk| t.toolkit.as_ref().is_some_and(|k| k.name == tk))
            })
            .cloned()
            .collect();
        Ok(ToolPage {
            total_count: matching.len(),
            items: matching.into_iter().skip(offset).take(limit).collect(),
            offset,
            limit,
        })
    }

    async fn get_tool(&self, qualified_name: &str) -> Result<RemoteDefinition, RemoteError> {
        self.record(format!("get:{}", qualified_name));
        self.tools
            .iter()
            .find(|t| t.qualified_name == qualified_name)
            .cloned()
            .ok_or_else(|| RemoteError::Api {
                status: 404,
                message: "not found".into(),
            })
    }

    async fn authorize(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationResponse, RemoteError> {
        self.record(format!("authorize:{}:{}", tool_name, user_id));
        Ok(serde_json::from_value(json!({
            "id": "ar_9",
            "status": self.status,
            "url": "https://auth.example.com/ar_9"
        }))?)
    }

    async fn authorization_status(
        &self,
        auth_id: &str,
        _wait_secs: u64,
    ) -> Result<AuthorizationResponse, RemoteError> {
        self.record(format!("status:{}", auth_id));
        Ok(serde_json::from_value(json!({"id": auth_id, "status": "completed"}))?)
    }

    async fn execute(
        &self,
        tool_name: &str,
        input: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<ExecuteResponse, RemoteError> {
        self.record(format!("execute:{}:{}:{}", tool_name, input, user_id.unwrap_or("-")));
        Ok(serde_json::from_value(json!({
            "id": "te_9",
            "success": true,
            "output": {"value": {"results": []}}
        }))?)
    }
}

fn search_web(requires_auth: bool) -> RemoteDefinition {
    let mut def = json!({
        "name": "web",
        "qualified_name": "search.web",
        "description": "Search the web",
        "toolkit": {"name": "search"},
        "input": {
            "parameters": [
                {
                    "name": "query",
                    "required": true,
                    "description": "What to search for",
                    "value_schema": {"val_type": "string"}
                },
                {
                    "name": "engine",
                    "required": false,
                    "value_schema": {"val_type": "string", "enum": ["google", "bing"]}
                }
            ]
        }
    });
    if requires_auth {
        def["requirements"] = json!({"authorization": {"provider_id": "google"}});
    }
    serde_json::from_value(def).unwrap()
}

/// Replays canned model responses; answers "done" once exhausted.
struct ScriptedClient {
    responses: Mutex<Vec<Response>>,
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn create_message(&self, _req: &Request) -> Result<Response, LlmError> {
        let mut responses = self.responses.lock().unwrap();
        let next = if responses.is_empty() {
            Response {
                id: "r".into(),
                model: "test".into(),
                text: "done".into(),
                tool_calls: Vec::new(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            }
        } else {
            responses.remove(0)
        };
        Ok(next)
    }
}

fn call(name: &str, arguments: serde_json::Value) -> Response {
    Response {
        id: "r".into(),
        model: "test".into(),
        text: String::new(),
        tool_calls: vec![ToolCall {
            id: "call_1".into(),
            name: name.into(),
            arguments,
        }],
        stop_reason: StopReason::ToolCalls,
        usage: Usage::default(),
    }
}

#[tokio::test]
async fn test_completed_authorization_returns_output() {
    let service = StubService::new(vec![search_web(true)], AuthorizationStatus::Completed);
    let tools = remote_tools(service.clone(), &ToolSelection::new().tool("search.web"), true)
        .await
        .unwrap();
    let session = Session::new("app", "user-42");

    let result = tools[0]
        .execute(json!({"query": "rust"}), &session)
        .await
        .unwrap();

    assert_eq!(result.value, json!({"results": []}));
    assert_eq!(
        service.calls(),
        vec![
            "get:search.web",
            "authorize:search.web:user-42",
            r#"execute:search.web:{"query":"rust"}:user-42"#,
        ]
    );
}

#[tokio::test]
async fn test_pending_authorization_never_executes() {
    let service = StubService::new(vec![search_web(true)], AuthorizationStatus::Pending);
    let tools = remote_tools(service.clone(), &ToolSelection::new().tool("search.web"), true)
        .await
        .unwrap();
    let session = Session::new("app", "user-42");

    let err = tools[0]
        .execute(json!({"query": "rust"}), &session)
        .await
        .unwrap_err();

    match err {
        ToolgateError::Authorization(e) => {
            assert_eq!(e.response.status, AuthorizationStatus::Pending);
            assert_eq!(e.response.url.as_deref(), Some("https://auth.example.com/ar_9"));
        }
        other => panic!("Expected Authorization error, got {:?}", other),
    }
    assert!(!service.calls().iter().any(|c| c.starts_with("execute")));
}

#[tokio::test]
async fn test_empty_selection_fails_before_network() {
    let service = StubService::new(vec![search_web(false)], AuthorizationStatus::Completed);

    let err = remote_tools(service.clone(), &ToolSelection::new(), true)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ToolgateError::Config(ConfigError::EmptySelection)
    ));
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_sanitized_collision_is_rejected() {
    let mut other = search_web(false);
    other.qualified_name = "search_web".into();
    let service = StubService::new(
        vec![search_web(false), other],
        AuthorizationStatus::Completed,
    );

    let err = remote_tools(service, &ToolSelection::new().toolkit("search"), true)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ToolgateError::Config(ConfigError::NameConflict { .. })
    ));
}

#[tokio::test]
async fn test_declarations_reach_the_model() {
    let service = StubService::new(vec![search_web(false)], AuthorizationStatus::Completed);
    let tools = remote_tools(service, &ToolSelection::new().toolkit("search"), true)
        .await
        .unwrap();

    let registry = Registry::new();
    assert_eq!(registry.register_all(tools).await.unwrap(), 1);

    let definitions = registry.declarations().await;
    let def = &definitions[0];
    assert_eq!(def.name, "search_web");
    assert_eq!(def.description, "Search the web");
    assert_eq!(def.parameters["type"], "object");
    assert_eq!(def.parameters["properties"]["query"]["type"], "string");
    assert_eq!(
        def.parameters["properties"]["engine"]["enum"],
        json!(["google", "bing"])
    );
    assert_eq!(def.parameters["required"], json!(["query"]));
}

async fn runner_for(service: Arc<StubService>, policy: Policy, script: Vec<Response>) -> Runner {
    let tools = remote_tools(service, &ToolSelection::new().tool("search.web"), true)
        .await
        .unwrap();
    let registry = Registry::new();
    registry.register_all(tools).await.unwrap();

    let mut hooks = HookRegistry::new();
    hooks.register(ConfirmationHook::new(policy, Arc::new(AlwaysReject)));

    let agent = Agent::new("helper", "openai/gpt-4o-mini")
        .registry(registry)
        .hooks(Arc::new(hooks));
    let client = Arc::new(ScriptedClient {
        responses: Mutex::new(script),
    });
    Runner::new(agent, client)
}

#[tokio::test]
async fn test_runner_executes_allowed_call() {
    let service = StubService::new(vec![search_web(true)], AuthorizationStatus::Completed);
    let policy = Policy::builder().allow_pattern("search_*").build();
    let runner = runner_for(
        service.clone(),
        policy,
        vec![call("search_web", json!({"query": "rust"}))],
    )
    .await;
    let mut session = Session::new("app", "user-42");

    let events: Vec<_> = runner.run(&mut session, "find rust").collect().await;

    let texts: Vec<_> = events
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| format!("{}: {}", e.author, e.text))
        .collect();
    assert_eq!(texts, vec!["helper: done"]);
    assert!(
        service
            .calls()
            .contains(&r#"execute:search.web:{"query":"rust"}:user-42"#.to_string())
    );
}

#[tokio::test]
async fn test_runner_rejected_confirmation_skips_service() {
    let service = StubService::new(vec![search_web(true)], AuthorizationStatus::Completed);
    let runner = runner_for(
        service.clone(),
        Policy::ask_all(),
        vec![call("search_web", json!({"query": "rust"}))],
    )
    .await;
    let mut session = Session::new("app", "user-42");

    let events: Vec<_> = runner.run(&mut session, "find rust").collect().await;

    assert!(events.iter().all(Result::is_ok));
    assert_eq!(service.calls(), vec!["get:search.web"]);
}

#[tokio::test]
async fn test_runner_surfaces_pending_authorization() {
    let service = StubService::new(vec![search_web(true)], AuthorizationStatus::Pending);
    let policy = Policy::allow_all();
    let runner = runner_for(
        service.clone(),
        policy,
        vec![call("search_web", json!({"query": "rust"}))],
    )
    .await;
    let mut session = Session::new("app", "user-42");

    let events: Vec<_> = runner.run(&mut session, "find rust").collect().await;

    assert_eq!(events.len(), 1);
    let err = events.into_iter().next().unwrap().unwrap_err();
    assert!(err.to_string().contains("status: pending"));
}
