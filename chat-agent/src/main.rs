// ABOUTME: Interactive chat agent wired to remotely hosted tools.
// ABOUTME: Reads user lines, runs turns, and asks before each tool call.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use rustyline::DefaultEditor;
use toolgate::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Asks on the terminal before a tool runs. Anything but `y`/`yes` declines.
struct TerminalApproval;

#[async_trait]
impl ApprovalHandler for TerminalApproval {
    async fn approve(&self, request: &ApprovalRequest) -> Result<bool, anyhow::Error> {
        let prompt = request.prompt();
        let answer = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
            let mut stdout = std::io::stdout();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok(line)
        })
        .await??;

        Ok(is_affirmative(&answer))
    }
}

async fn build_runner(config: &Config, session: &Session) -> Result<Runner> {
    let service: Arc<dyn ToolService> = Arc::new(HttpToolService::new(
        &config.base_url,
        &config.api_key,
    )?);

    let tools = remote_tools(service.clone(), &config.selection(), true).await?;

    preauthorize(service.as_ref(), session, &tools, |tool, url| {
        println!("Authorization required for {}. Visit:\n  {}\n", tool, url);
    })
    .await?;

    let registry = Registry::new();
    let count = registry.register_all(tools).await?;
    info!(count, "registered remote tools");
    println!("Tools: {}\n", registry.list().await.join(", "));

    let mut hooks = HookRegistry::new();
    let confirmation = if config.confirm_tools {
        ConfirmationHook::new(Policy::ask_all(), Arc::new(TerminalApproval))
    } else {
        ConfirmationHook::new(Policy::allow_all(), Arc::new(AlwaysApprove))
    };
    hooks.register(confirmation);

    let agent = Agent::new(&config.agent_name, &config.model)
        .instruction(&config.system_prompt)
        .registry(registry)
        .hooks(Arc::new(hooks));
    let client = Arc::new(OpenAIClient::new(&config.llm_api_key, &config.llm_base_url));

    Ok(Runner::new(agent, client))
}

async fn chat_loop(runner: &Runner, session: &mut Session) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    loop {
        let line = match rl.readline("User: ") {
            Ok(line) => line,
            Err(_) => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }

        let _ = rl.add_history_entry(line);

        let mut events = runner.run(session, line);
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => println!("** {}: {}", event.author, event.text),
                Err(e) => println!("Error: {}", e),
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let mut session = Session::new(&config.agent_name, &config.user_id);

    let runner = build_runner(&config, &session).await?;
    chat_loop(&runner, &mut session).await
}
