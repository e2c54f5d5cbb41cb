use std::sync::Arc;

use crate::services::gmail_service::MailSender;
use crate::services::llm_service::ChatModel;
use crate::token_store::TokenStore;

/// Shared state injected into every handler. The chat model is absent when
/// no API key is configured; the chat endpoint reports that in-band.
#[derive(Clone)]
pub struct AppState {
    pub llm: Option<Arc<dyn ChatModel>>,
    pub mailer: Arc<dyn MailSender>,
    pub tokens: TokenStore,
}
