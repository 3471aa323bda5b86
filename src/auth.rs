// ABOUTME: Authorization gate - checks with the remote service that a user has
// ABOUTME: granted access to a tool before it runs. Single round-trip per call.

use tracing::{debug, info};

use crate::error::{AuthorizationError, ConfigError, ToolgateError};
use crate::remote::{AuthorizationResponse, AuthorizationStatus, ToolService};
use crate::session::Session;
use crate::tool::{RemoteTool, Tool};

/// How long the service may hold each status request during pre-authorization.
pub const STATUS_WAIT_SECS: u64 = 59;

/// Require a completed authorization for `tool_name` and the session's user.
///
/// Fails with [`ConfigError::MissingUserId`] before any network call when the
/// session has no user identity. Any status other than `completed` fails with
/// an [`AuthorizationError`] carrying the full response.
pub async fn authorize(
    service: &dyn ToolService,
    session: &Session,
    tool_name: &str,
) -> Result<AuthorizationResponse, ToolgateError> {
    let user_id = session.user_id().ok_or(ConfigError::MissingUserId)?;

    let response = service.authorize(tool_name, user_id).await?;
    debug!(tool = tool_name, status = %response.status, "authorization checked");

    if !response.is_completed() {
        return Err(AuthorizationError {
            tool_name: tool_name.to_string(),
            response,
        }
        .into());
    }

    Ok(response)
}

/// Walk every tool that needs authorization and get each handshake completed
/// up front, so the first call in a conversation does not fail on it.
///
/// A pending handshake is reported through `notify` with the tool's original
/// name and the URL where the user grants access, then the status endpoint is
/// polled until the handshake leaves `pending`.
///
/// There is no overall deadline: as long as the service keeps reporting
/// `pending`, this keeps waiting, so startup can block indefinitely on a
/// user who never completes the handshake.
pub async fn preauthorize<F>(
    service: &dyn ToolService,
    session: &Session,
    tools: &[RemoteTool],
    mut notify: F,
) -> Result<(), ToolgateError>
where
    F: FnMut(&str, &str),
{
    for tool in tools.iter().filter(|t| t.requires_authorization()) {
        let tool_name = tool.original_name();
        let user_id = session.user_id().ok_or(ConfigError::MissingUserId)?;
        let mut response = service.authorize(tool_name, user_id).await?;

        if response.status == AuthorizationStatus::Pending {
            if let Some(url) = &response.url {
                notify(tool_name, url);
            }
        }

        while response.status == AuthorizationStatus::Pending {
            let Some(auth_id) = response.id.clone() else {
                break;
            };
            response = service
                .authorization_status(&auth_id, STATUS_WAIT_SECS)
                .await?;
        }

        if !response.is_completed() {
            return Err(AuthorizationError {
                tool_name: tool_name.to_string(),
                response,
            }
            .into());
        }
        info!(tool = tool_name, "authorized");
    }
    Ok(())
}
