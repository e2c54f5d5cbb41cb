use crate::models::email::EmailDraft;
use crate::models::message::{ChatMessage, Role};

/// The running state of one chat turn: the message history plus the email
/// draft extracted from the latest user message, if any. Constructed fresh
/// for every request and discarded once the reply is returned.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    pub messages: Vec<ChatMessage>,
    pub pending_email: Option<EmailDraft>,
}

impl ConversationState {
    /// Seeds a new turn with the fixed system instruction and the user's
    /// message.
    pub fn seeded(system_prompt: &str, user_input: &str) -> Self {
        ConversationState {
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_input),
            ],
            pending_email: None,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn latest_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }

    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_state_holds_system_then_user_message() {
        let state = ConversationState::seeded("be helpful", "hi there");
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, Role::System);
        assert_eq!(state.latest_user_message(), Some("hi there"));
        assert!(state.pending_email.is_none());
    }

    #[test]
    fn last_content_tracks_appends() {
        let mut state = ConversationState::seeded("sys", "question");
        state.push(ChatMessage::assistant("answer"));
        assert_eq!(state.last_content(), Some("answer"));
    }
}
