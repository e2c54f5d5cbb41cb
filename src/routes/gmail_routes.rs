use actix_session::Session;
use actix_web::{post, web, Responder};

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(send_email);
}

#[post("/mcp/gmail/send")]
async fn send_email(
    data: web::Data<crate::routes::app_state::AppState>,
    session: Session,
    payload: web::Json<crate::models::email::EmailDraft>,
) -> impl Responder {
    crate::handlers::send_handler::handle_send_request(data, session, payload).await
}
