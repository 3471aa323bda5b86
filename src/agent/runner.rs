// ABOUTME: Runner - executes the think-act loop for one user turn, firing hooks
// ABOUTME: around every tool call and streaming the agent's text as events.

use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::{debug, warn};

use super::definition::Agent;
use crate::error::{LlmError, ToolgateError};
use crate::hook::{HookAction, HookEvent};
use crate::llm::{LlmClient, Message, Request, ToolCall, ToolOutcome};
use crate::session::Session;

/// Text produced by an agent during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub author: String,
    pub text: String,
}

/// Events of one turn. The stream ends after the first error.
pub type EventStream<'a> = Pin<Box<dyn Stream<Item = Result<Event, ToolgateError>> + Send + 'a>>;

/// Drives an [`Agent`] against a model client.
pub struct Runner {
    agent: Agent,
    client: Arc<dyn LlmClient>,
}

impl Runner {
    pub fn new(agent: Agent, client: Arc<dyn LlmClient>) -> Self {
        Self { agent, client }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Run one user turn.
    ///
    /// `SessionStart` fires first and `SessionEnd` fires last, carrying the
    /// error message when the turn failed. Authorization, execution and hook
    /// failures abort the turn; a blocked or unknown tool call is reported
    /// back to the model as an error outcome instead. An aborted turn still
    /// answers every call the model made, so the session stays usable.
    pub fn run<'a>(&'a self, session: &'a mut Session, text: impl Into<String>) -> EventStream<'a> {
        let prompt = text.into();
        let session_id = session.id().to_string();
        let hooks = self.agent.hooks.clone();

        Box::pin(async_stream::stream! {
            let start = HookEvent::SessionStart {
                session_id: session_id.clone(),
                prompt: prompt.clone(),
            };
            if let Err(e) = hooks.fire(&start).await {
                yield Err(ToolgateError::Hook(e));
                return;
            }

            let mut error = None;
            let mut turn = self.turn(session, prompt);
            while let Some(item) = turn.next().await {
                if let Err(e) = &item {
                    error = Some(e.to_string());
                }
                let failed = item.is_err();
                yield item;
                if failed {
                    break;
                }
            }
            drop(turn);

            let end = HookEvent::SessionEnd { session_id, error };
            if let Err(e) = hooks.fire(&end).await {
                yield Err(ToolgateError::Hook(e));
            }
        })
    }

    fn turn<'a>(&'a self, session: &'a mut Session, prompt: String) -> EventStream<'a> {
        let agent = &self.agent;
        let client = self.client.clone();

        Box::pin(async_stream::try_stream! {
            session.messages.push(Message::user(prompt));

            let mut iterations = 0;
            loop {
                iterations += 1;
                if iterations > agent.max_iterations {
                    Err::<(), _>(LlmError::MaxIterations(agent.max_iterations))?;
                }

                let mut request = Request::new(&agent.model)
                    .messages(session.messages.clone())
                    .functions(agent.registry.declarations().await)
                    .max_tokens(agent.max_tokens);
                if !agent.instruction.is_empty() {
                    request = request.system(&agent.instruction);
                }

                let response = client.create_message(&request).await?;
                debug!(iteration = iterations, stop_reason = ?response.stop_reason, "model responded");

                agent
                    .hooks
                    .fire(&HookEvent::ResponseReceived {
                        author: agent.name.clone(),
                        text: response.text.clone(),
                        tool_calls: response.tool_calls.clone(),
                    })
                    .await
                    .map_err(ToolgateError::Hook)?;

                if !response.text.is_empty() {
                    yield Event {
                        author: agent.name.clone(),
                        text: response.text.clone(),
                    };
                }

                session.messages.push(response.to_message());
                if response.tool_calls.is_empty() {
                    break;
                }

                let mut outcomes = Vec::with_capacity(response.tool_calls.len());
                let mut failure = None;
                for call in &response.tool_calls {
                    if failure.is_some() {
                        outcomes.push(ToolOutcome::failure(
                            &call.id,
                            "Not run: an earlier tool call in this turn failed",
                        ));
                        continue;
                    }
                    match dispatch(agent, session, call).await {
                        Ok(outcome) => outcomes.push(outcome),
                        Err(e) => {
                            outcomes.push(ToolOutcome::failure(&call.id, e.to_string()));
                            failure = Some(e);
                        }
                    }
                }

                session.messages.push(Message::ToolOutcomes(outcomes));
                if let Some(e) = failure {
                    Err::<(), _>(e)?;
                }
            }
        })
    }
}

/// Run one tool call through the hooks and the registry.
///
/// `Err` means the turn must end; everything the model can act on comes
/// back as an outcome.
async fn dispatch(
    agent: &Agent,
    session: &Session,
    call: &ToolCall,
) -> Result<ToolOutcome, ToolgateError> {
    let pre = HookEvent::PreToolUse {
        call: call.clone(),
        session: session.info(),
    };
    let mut call = call.clone();
    match agent.hooks.fire(&pre).await.map_err(ToolgateError::Hook)? {
        HookAction::Continue => {}
        HookAction::Transform(arguments) => call.arguments = arguments,
        HookAction::Block(reason) => {
            warn!(tool = %call.name, reason = %reason, "tool call blocked");
            return Ok(ToolOutcome::failure(&call.id, reason));
        }
    }

    let Some(tool) = agent.registry.get(&call.name).await else {
        warn!(tool = %call.name, "model called an unknown tool");
        return Ok(ToolOutcome::failure(
            &call.id,
            format!("Tool '{}' not found", call.name),
        ));
    };

    let result = tool.execute(call.arguments.clone(), session).await?;

    agent
        .hooks
        .fire(&HookEvent::PostToolUse {
            call: call.clone(),
            result: result.clone(),
        })
        .await
        .map_err(ToolgateError::Hook)?;

    Ok(ToolOutcome::success(&call.id, result.to_content()))
}
