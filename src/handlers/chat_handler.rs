use actix_session::Session;
use actix_web::{web, HttpResponse};
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;

use crate::config;
use crate::handlers::session::ensure_session_id;
use crate::routes::app_state::AppState;
use crate::services::agent_service;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// One agent turn per request. Always answers with HTTP 200 and a `reply`
/// string; internal failures are reported in-band.
pub async fn handle_chat_request(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<ChatRequest>,
) -> HttpResponse {
    let Some(llm) = data.llm.as_ref() else {
        return HttpResponse::Ok().json(json!({
            "reply": "Missing OpenRouter API key. Check your .env setup."
        }));
    };

    if let Some(ref model) = req_body.model {
        // the request schema still carries a model field, but the agent flow
        // pins its own
        debug!("Ignoring requested model {:?} in favour of {}", model, config::DEFAULT_MODEL);
    }

    let session_id = ensure_session_id(&session);
    info!("Processing message for session {}", session_id);

    let credentials = data.tokens.get(&session_id);
    let reply = agent_service::handle_turn(
        &req_body.message,
        llm.as_ref(),
        data.mailer.as_ref(),
        credentials.as_ref(),
    )
    .await;

    HttpResponse::Ok().json(json!({ "reply": reply }))
}
