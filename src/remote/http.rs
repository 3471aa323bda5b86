// ABOUTME: HTTP implementation of ToolService over the remote REST API.
// ABOUTME: Bearer-token auth, one round-trip per operation, no retries.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{AuthorizationResponse, ExecuteResponse, ToolDefinition, ToolPage, ToolService};
use crate::error::RemoteError;

pub const DEFAULT_BASE_URL: &str = "https://api.arcade.dev";

/// Remote tool service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpToolService {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct AuthorizeBody<'a> {
    tool_name: &'a str,
    user_id: &'a str,
}

#[derive(Serialize)]
struct ExecuteBody<'a> {
    tool_name: &'a str,
    input: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

impl HttpToolService {
    /// Create a client for the service at `base_url`.
    ///
    /// No request timeout is set; the remote service decides how long an
    /// execution or authorization may take.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, RemoteError> {
        reqwest::Url::parse(base_url).map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .user_agent(format!("toolgate/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;
        decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RemoteError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Pull a readable message out of an error body, falling back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ToolService for HttpToolService {
    async fn list_tools(
        &self,
        toolkit: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<ToolPage, RemoteError> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(toolkit) = toolkit {
            query.push(("toolkit", toolkit.to_string()));
        }
        self.get("/v1/tools", &query).await
    }

    async fn get_tool(&self, qualified_name: &str) -> Result<ToolDefinition, RemoteError> {
        self.get(
            "/v1/tools/definition",
            &[("name", qualified_name.to_string())],
        )
        .await
    }

    async fn authorize(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationResponse, RemoteError> {
        self.post("/v1/tools/authorize", &AuthorizeBody { tool_name, user_id })
            .await
    }

    async fn authorization_status(
        &self,
        auth_id: &str,
        wait_secs: u64,
    ) -> Result<AuthorizationResponse, RemoteError> {
        self.get(
            "/v1/auth/status",
            &[("id", auth_id.to_string()), ("wait", wait_secs.to_string())],
        )
        .await
    }

    async fn execute(
        &self,
        tool_name: &str,
        input: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<ExecuteResponse, RemoteError> {
        self.post(
            "/v1/tools/execute",
            &ExecuteBody {
                tool_name,
                input,
                user_id,
            },
        )
        .await
    }
}
