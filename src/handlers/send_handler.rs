use actix_session::Session;
use actix_web::{web, HttpResponse};
use log::error;
use serde_json::json;

use crate::handlers::session::ensure_session_id;
use crate::models::email::EmailDraft;
use crate::routes::app_state::AppState;

/// Direct send endpoint bypassing the chat flow. Unlike the chat turn, this
/// surfaces failures as structured errors with real status codes.
pub async fn handle_send_request(
    data: web::Data<AppState>,
    session: Session,
    payload: web::Json<EmailDraft>,
) -> HttpResponse {
    let session_id = ensure_session_id(&session);

    let Some(credentials) = data.tokens.get(&session_id) else {
        return HttpResponse::Forbidden().json(json!({ "error": "User not authenticated" }));
    };

    match data.mailer.send(&credentials, &payload).await {
        Ok(id) => HttpResponse::Ok().json(json!({ "message": "Email sent!", "id": id })),
        Err(e) => {
            error!("Direct email send failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
