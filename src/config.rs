// ABOUTME: Startup configuration read from environment variables.
// ABOUTME: Built once and passed by reference; missing secrets fail early.

use crate::catalog::ToolSelection;
use crate::error::ConfigError;
use crate::llm::DEFAULT_OPENAI_BASE_URL;
use crate::remote::DEFAULT_BASE_URL;

pub const DEFAULT_AGENT_NAME: &str = "toolgate";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that can use the tools \
provided to answer the user's requests. When a tool needs authorization, tell the user to \
follow the link it returns and then ask again.";

/// Everything the driver needs to wire an agent together.
#[derive(Debug, Clone)]
pub struct Config {
    pub agent_name: String,
    pub model: String,
    pub system_prompt: String,
    /// Identity the remote service authorizes and executes tools for.
    pub user_id: String,
    /// Remote tool service credentials.
    pub api_key: String,
    pub base_url: String,
    /// Qualified tool names to expose.
    pub tools: Vec<String>,
    /// Toolkits whose every tool is exposed.
    pub toolkits: Vec<String>,
    pub llm_api_key: String,
    pub llm_base_url: String,
    /// Ask before each tool call.
    pub confirm_tools: bool,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| get(key).ok_or_else(|| ConfigError::MissingVar(key.to_string()));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let confirm_tools = match get("CONFIRM_TOOLS") {
            Some(raw) => parse_bool("CONFIRM_TOOLS", &raw)?,
            None => true,
        };

        Ok(Self {
            agent_name: or_default("AGENT_NAME", DEFAULT_AGENT_NAME),
            model: or_default("MODEL", DEFAULT_MODEL),
            system_prompt: or_default("SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
            user_id: required("ARCADE_USER_ID")?,
            api_key: required("ARCADE_API_KEY")?,
            base_url: or_default("ARCADE_BASE_URL", DEFAULT_BASE_URL),
            tools: split_list(get("TOOLS").as_deref()),
            toolkits: split_list(get("MCP_SERVERS").as_deref()),
            llm_api_key: required("OPENAI_API_KEY")?,
            llm_base_url: or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            confirm_tools,
        })
    }

    /// The tools and toolkits to fetch from the remote service.
    pub fn selection(&self) -> ToolSelection {
        ToolSelection {
            tools: self.tools.clone(),
            toolkits: self.toolkits.clone(),
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidVar {
            name: name.to_string(),
            message: format!("expected a boolean, got '{}'", raw),
        }),
    }
}
