use std::time::Instant;

use log::{error, info};

use crate::config;
use crate::models::conversation::ConversationState;
use crate::models::credentials::StoredCredentials;
use crate::models::message::ChatMessage;
use crate::services::gmail_service::{MailSender, SendError};
use crate::services::intent_service;
use crate::services::llm_service::{ChatModel, LlmError};

/// Outcome of the routing decision after an agent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    SendEmail,
    Terminate,
}

/// The turn's sole branch point: it ends immediately unless the agent step
/// attached a complete email draft.
pub fn route(state: &ConversationState) -> TurnAction {
    if state.pending_email.is_some() {
        TurnAction::SendEmail
    } else {
        TurnAction::Terminate
    }
}

/// Runs one agent step: look for an email intent in the latest user message,
/// ask the model for a reply on the full history, and attach the extracted
/// draft to the returned state. Exactly one model call per step.
pub async fn agent_step(
    state: &mut ConversationState,
    llm: &dyn ChatModel,
) -> Result<(), LlmError> {
    let extracted = state.latest_user_message().and_then(intent_service::detect);
    if let Some(ref draft) = extracted {
        info!("Extracted email details: to={} subject={}", draft.to, draft.subject);
    }

    let reply = llm.complete(config::DEFAULT_MODEL, &state.messages).await?;
    state.push(ChatMessage::assistant(reply));
    state.pending_email = extracted;
    Ok(())
}

/// Sends the pending draft and reports the outcome as an assistant message.
/// Missing credentials and send failures stay in-band; the turn always
/// completes with a reply.
pub async fn send_email_action(
    state: &mut ConversationState,
    mailer: &dyn MailSender,
    credentials: Option<&StoredCredentials>,
) {
    let Some(draft) = state.pending_email.take() else {
        return;
    };

    let outcome = match credentials {
        Some(creds) => mailer.send(creds, &draft).await,
        None => Err(SendError::NotAuthenticated),
    };

    let message = match outcome {
        Ok(id) => format!("Email sent to {} (id: {})", draft.to, id),
        Err(e) => {
            error!("Failed to send email: {}", e);
            format!("Failed to send email: {}", e)
        }
    };
    state.push(ChatMessage::assistant(message));
}

/// Runs one complete turn: seed the state, one agent step, one routing
/// decision, at most one send action. Returns the content of the last
/// message in the final state.
pub async fn run_turn(
    user_input: &str,
    llm: &dyn ChatModel,
    mailer: &dyn MailSender,
    credentials: Option<&StoredCredentials>,
) -> Result<String, LlmError> {
    let started = Instant::now();
    info!("Turn started");

    let mut state = ConversationState::seeded(config::SYSTEM_PROMPT, user_input);
    agent_step(&mut state, llm).await?;

    if route(&state) == TurnAction::SendEmail {
        send_email_action(&mut state, mailer, credentials).await;
    }

    let reply = state.last_content().unwrap_or_default().to_string();
    info!("Turn finished in {} ms", started.elapsed().as_millis());
    Ok(reply)
}

/// Request-boundary wrapper around [`run_turn`]: every failure becomes a
/// reply string, so the chat endpoint always answers.
pub async fn handle_turn(
    user_input: &str,
    llm: &dyn ChatModel,
    mailer: &dyn MailSender,
    credentials: Option<&StoredCredentials>,
) -> String {
    match run_turn(user_input, llm, mailer, credentials).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Turn failed: {}", e);
            format!("Something went wrong while answering: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::email::EmailDraft;

    fn draft() -> EmailDraft {
        EmailDraft {
            to: "bob@example.com".to_string(),
            subject: "Hi".to_string(),
            body: "Let's meet".to_string(),
        }
    }

    #[test]
    fn routes_to_terminate_without_a_draft() {
        let state = ConversationState::seeded("sys", "hello");
        assert_eq!(route(&state), TurnAction::Terminate);
    }

    #[test]
    fn routes_to_send_email_with_a_draft() {
        let mut state = ConversationState::seeded("sys", "hello");
        state.pending_email = Some(draft());
        assert_eq!(route(&state), TurnAction::SendEmail);
    }
}
